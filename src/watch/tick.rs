use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::desktop::DesktopBackend;
use crate::display::{order_displays, parse_displays};
use crate::error::AutolayoutError;
use crate::identity::{Fingerprint, resolve_script};
use crate::xresources;

use super::state::{TickOutcome, WatchState};

/// Immutable inputs shared by every tick
pub struct WatchContext<'a, B: DesktopBackend> {
    pub backend: &'a B,
    pub script_dir: &'a Path,
    pub xresources_path: &'a Path,
    pub post_hook: Option<&'a Path>,
}

/// Poll once. Returns the state to carry into the next tick.
///
/// On error nothing has been applied and the caller should keep its current
/// state so the next tick retries. Once the layout step has run, the new
/// fingerprint is committed even if publishing the outputs fails, so a
/// broken resource file never re-runs the layout script.
pub fn tick<B: DesktopBackend>(state: &WatchState, ctx: &WatchContext<'_, B>) -> Result<(WatchState, TickOutcome)> {
    let edids = ctx.backend.identities()?;
    let records = parse_displays(&ctx.backend.enumerate()?);
    if records.is_empty() {
        return Err(AutolayoutError::MissingDisplayData.into());
    }
    let fingerprint = Fingerprint::from_displays(&records, &edids);

    if state.is_current(&fingerprint) {
        return Ok((state.clone(), TickOutcome::Unchanged));
    }

    info!(displays = %fingerprint, script = %fingerprint.script_name(), "display configuration changed");
    let script_applied = apply_layout(ctx, &fingerprint);

    let published = match publish(ctx) {
        Ok(()) => true,
        Err(e) => {
            error!(error = %format!("{e:#}"), "failed to publish outputs");
            false
        }
    };

    if let Some(post) = ctx.post_hook {
        if let Err(e) = ctx.backend.run_script(post) {
            error!(script = %post.display(), error = %e, "post hook failed");
        }
    }

    let next = WatchState {
        previous: Some(fingerprint.clone()),
    };
    Ok((next, TickOutcome::Changed { fingerprint, script_applied, published }))
}

/// Re-read the applied layout, write the resource file and reload
fn publish<B: DesktopBackend>(ctx: &WatchContext<'_, B>) -> Result<()> {
    let ordered = order_displays(parse_displays(&ctx.backend.enumerate()?));
    if ordered.is_empty() {
        warn!("no connected displays after applying layout");
    }
    for (index, record) in ordered.iter().enumerate() {
        info!(
            index,
            display = %record.name,
            primary = record.is_primary,
            geometry = ?record.geometry.map(|g| g.to_string()),
            rotation = ?record.rotation,
            orientation = ?record.orientation(),
            layout = ?record.layout(),
            "output"
        );
    }
    xresources::write(ctx.xresources_path, &xresources::render(&ordered))?;
    ctx.backend.reload();
    Ok(())
}

/// Run the matching layout script, or the fallback command when there is
/// none or it fails. Returns whether the layout script succeeded.
fn apply_layout<B: DesktopBackend>(ctx: &WatchContext<'_, B>, fingerprint: &Fingerprint) -> bool {
    let outcome = resolve_script(ctx.script_dir, fingerprint)
        .map_err(anyhow::Error::from)
        .and_then(|script: PathBuf| ctx.backend.run_script(&script));

    match outcome {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "could not apply layout script, falling back");
            if let Err(e) = ctx.backend.reset_layout() {
                error!(error = %e, "fallback layout command failed");
            }
            false
        }
    }
}
