//! Display change loop - polls xrandr and reapplies the layout on every change

mod state;
#[cfg(test)]
mod testing;
mod tick;

pub use state::{TickOutcome, WatchState};
pub use tick::{WatchContext, tick};

use anyhow::{Result, bail};
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::desktop::DesktopBackend;
use crate::error::AutolayoutError;

/// Run a single forced pass. The initial state never matches, so this
/// always goes through the full change handling. Failing to publish the
/// outputs is an error here since there is no later tick to report it.
pub fn run_once<B: DesktopBackend>(ctx: &WatchContext<'_, B>) -> Result<TickOutcome> {
    let (_, outcome) = tick(&WatchState::new(), ctx)?;
    if let TickOutcome::Changed { published: false, .. } = outcome {
        bail!("layout applied but the resource file could not be written");
    }
    Ok(outcome)
}

/// Poll until the display server goes away. Other errors are logged and the
/// previous state is kept, so the next tick retries.
pub fn run<B: DesktopBackend>(ctx: &WatchContext<'_, B>, interval: Duration) -> Result<()> {
    info!(interval_secs = interval.as_secs(), "watching for display changes");
    let mut state = WatchState::new();
    loop {
        match tick(&state, ctx) {
            Ok((next, TickOutcome::Unchanged)) => {
                debug!("display configuration unchanged");
                state = next;
            }
            Ok((next, TickOutcome::Changed { fingerprint, script_applied, published })) => {
                info!(displays = %fingerprint, script_applied, published, "applied display configuration");
                state = next;
            }
            Err(e) if matches!(e.downcast_ref::<AutolayoutError>(), Some(AutolayoutError::DisplayServerLost)) => {
                error!(error = %format!("{e:#}"), "display server gone, exiting");
                return Err(e);
            }
            Err(e) => error!(error = %format!("{e:#}"), "poll failed"),
        }
        thread::sleep(interval);
    }
}
