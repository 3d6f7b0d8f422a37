//! User settings loaded from JSON
//!
//! Every field is optional in the file; missing fields fall back to the
//! defaults below, and a missing file means all defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::constants::{commands, paths, polling};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Seconds between two polls of the display state
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Directory with `<name>_<hash>...sh` layout scripts
    #[serde(default = "default_script_dir")]
    pub script_dir: PathBuf,

    /// Generated resource fragment
    #[serde(default = "default_xresources_path")]
    pub xresources_path: PathBuf,

    /// File passed to xrdb when reloading
    #[serde(default = "default_xresources_root")]
    pub xresources_root: PathBuf,

    /// Command run when no layout script applies
    #[serde(default = "default_fallback_command")]
    pub fallback_command: Vec<String>,
}

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_poll_interval() -> u64 {
    polling::DEFAULT_INTERVAL_SECS
}

fn default_script_dir() -> PathBuf {
    home().join(paths::SCRIPT_DIR)
}

fn default_xresources_path() -> PathBuf {
    home().join(paths::XRESOURCES_DIR).join(paths::XRESOURCES_FILE)
}

fn default_xresources_root() -> PathBuf {
    home().join(paths::XRESOURCES_ROOT)
}

fn default_fallback_command() -> Vec<String> {
    vec![commands::XRANDR.to_string(), "-s".to_string(), "0".to_string()]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            script_dir: default_script_dir(),
            xresources_path: default_xresources_path(),
            xresources_root: default_xresources_root(),
            fallback_command: default_fallback_command(),
        }
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Load settings from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).context(format!("Failed to read config file {}", path.display()));
            }
        };
        let mut settings: Self = serde_json::from_str(&contents)
            .context(format!("Failed to parse config file {}", path.display()))?;
        settings.validate_and_clamp();
        info!(path = %path.display(), "loaded config");
        Ok(settings)
    }

    /// Clamp out-of-range values, logging each correction
    fn validate_and_clamp(&mut self) {
        if self.poll_interval_secs < polling::MIN_INTERVAL_SECS {
            warn!(poll_interval_secs = self.poll_interval_secs, min = polling::MIN_INTERVAL_SECS, "poll_interval_secs below minimum, clamping");
            self.poll_interval_secs = polling::MIN_INTERVAL_SECS;
        } else if self.poll_interval_secs > polling::MAX_INTERVAL_SECS {
            warn!(poll_interval_secs = self.poll_interval_secs, max = polling::MAX_INTERVAL_SECS, "poll_interval_secs exceeds maximum, clamping");
            self.poll_interval_secs = polling::MAX_INTERVAL_SECS;
        }

        if self.fallback_command.is_empty() {
            warn!(using = ?default_fallback_command(), "fallback_command is empty, using default");
            self.fallback_command = default_fallback_command();
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
