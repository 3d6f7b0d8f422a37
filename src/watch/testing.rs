//! Recording desktop backend shared by the change loop tests

use anyhow::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::desktop::DesktopBackend;
use crate::error::AutolayoutError;
use crate::identity::hardware_hash;

pub const DOCKED: &str = "eDP-1 connected primary 1920x1080+0+0\nHDMI-1 connected 1920x1080+1920+0";
pub const LAPTOP: &str = "eDP-1 connected primary 1920x1080+0+0\nHDMI-1 disconnected";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Script(PathBuf),
    Reset,
    Reload,
}

/// Fake desktop replaying canned xrandr output and recording side effects
pub struct FakeDesktop {
    output: RefCell<String>,
    pub edids: HashMap<String, Vec<u8>>,
    pub failing_scripts: Vec<PathBuf>,
    pub connection_lost: bool,
    calls: RefCell<Vec<Call>>,
}

impl FakeDesktop {
    pub fn new(xrandr: &str) -> Self {
        Self {
            output: RefCell::new(xrandr.to_string()),
            edids: HashMap::new(),
            failing_scripts: Vec::new(),
            connection_lost: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Switch what the next enumerations report
    pub fn set_output(&self, xrandr: &str) {
        *self.output.borrow_mut() = xrandr.to_string();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn script_runs(&self) -> usize {
        self.calls().iter().filter(|c| matches!(c, Call::Script(_))).count()
    }

    /// Layout scripts plus fallback resets
    pub fn layout_attempts(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Script(_) | Call::Reset))
            .count()
    }
}

impl DesktopBackend for FakeDesktop {
    fn enumerate(&self) -> Result<String> {
        Ok(self.output.borrow().clone())
    }

    fn identities(&self) -> Result<HashMap<String, Vec<u8>>> {
        if self.connection_lost {
            return Err(anyhow::anyhow!("broken pipe").context(AutolayoutError::DisplayServerLost));
        }
        Ok(self.edids.clone())
    }

    fn run_script(&self, path: &Path) -> Result<()> {
        self.calls.borrow_mut().push(Call::Script(path.to_path_buf()));
        if self.failing_scripts.iter().any(|p| p == path) {
            anyhow::bail!("script failed");
        }
        Ok(())
    }

    fn reset_layout(&self) -> Result<()> {
        self.calls.borrow_mut().push(Call::Reset);
        Ok(())
    }

    fn reload(&self) {
        self.calls.borrow_mut().push(Call::Reload);
    }
}

/// Temporary home with a script dir and a resource file location
pub struct Fixture {
    pub dir: tempfile::TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn script_dir(&self) -> PathBuf {
        self.dir.path().join(".screenlayout")
    }

    pub fn xresources_path(&self) -> PathBuf {
        self.dir.path().join(".Xresources.d").join("i3")
    }

    pub fn install_script(&self, name: &str) -> PathBuf {
        fs::create_dir_all(self.script_dir()).unwrap();
        let path = self.script_dir().join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Occupy the resource directory with a plain file so writes fail
    pub fn block_xresources_dir(&self) {
        fs::write(self.dir.path().join(".Xresources.d"), "").unwrap();
    }
}

pub fn docked_script_name() -> String {
    let empty = hardware_hash(&[]);
    format!("HDMI-1_{empty}_eDP-1_{empty}.sh")
}
