//! Everything the change loop does to the outside world

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::commands;
use crate::config::Settings;
use crate::constants::commands::{I3_MSG, I3_RELOAD, XRANDR, XRDB};
use crate::error::AutolayoutError;
use crate::x11_utils::{self, X11Context};

/// Side effects of the change loop
pub trait DesktopBackend {
    /// Raw `xrandr` enumeration text
    fn enumerate(&self) -> Result<String>;

    /// EDID bytes per connected output name. Fails with
    /// `AutolayoutError::DisplayServerLost` once the display server is gone.
    fn identities(&self) -> Result<HashMap<String, Vec<u8>>>;

    /// Run a layout or post-hook script
    fn run_script(&self, path: &Path) -> Result<()>;

    /// Reset to a single display when no layout script applies
    fn reset_layout(&self) -> Result<()>;

    /// Reload the resource database and the window manager config.
    /// Fire-and-forget: failures are only logged.
    fn reload(&self);
}

/// The real X11 session
pub struct X11Desktop {
    x11: X11Context,
    fallback_command: Vec<String>,
    xresources_root: PathBuf,
    home: PathBuf,
}

impl X11Desktop {
    pub fn connect(settings: &Settings) -> Result<Self> {
        Ok(Self {
            x11: X11Context::connect()?,
            fallback_command: settings.fallback_command.clone(),
            xresources_root: settings.xresources_root.clone(),
            home: dirs::home_dir().context("Failed to determine home directory")?,
        })
    }
}

impl DesktopBackend for X11Desktop {
    fn enumerate(&self) -> Result<String> {
        commands::capture(XRANDR, &[])
    }

    fn identities(&self) -> Result<HashMap<String, Vec<u8>>> {
        self.x11.connected_edids().map_err(|e| {
            if x11_utils::is_connection_lost(&e) {
                e.context(AutolayoutError::DisplayServerLost)
            } else {
                e
            }
        })
    }

    fn run_script(&self, path: &Path) -> Result<()> {
        info!(script = %path.display(), "running script");
        commands::run_script(path)
    }

    fn reset_layout(&self) -> Result<()> {
        let (program, args) = self
            .fallback_command
            .split_first()
            .context("fallback command is empty")?;
        info!(command = ?self.fallback_command, "resetting layout");
        commands::run(program.as_str(), &args.iter().map(String::as_str).collect::<Vec<_>>())
    }

    fn reload(&self) {
        let include = format!("-I{}", self.home.display());
        let root = self.xresources_root.display().to_string();
        commands::fire_and_forget(XRDB, &[include.as_str(), root.as_str()]);
        commands::fire_and_forget(I3_MSG, &[I3_RELOAD]);
    }
}
