//! Single-instance guard
//!
//! An exclusive `fs2` advisory lock on a file in the runtime directory. The
//! lock lives as long as the returned guard; the kernel drops it when the
//! process exits, however it exits.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::paths;
use crate::error::AutolayoutError;

/// Lock file path (XDG_RUNTIME_DIR with fallback to cache)
pub fn default_lock_path() -> Result<PathBuf> {
    if let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
        return Ok(PathBuf::from(runtime_dir).join(paths::LOCK_FILE));
    }

    let cache = dirs::cache_dir()
        .context("Failed to determine cache directory (no XDG_RUNTIME_DIR or HOME)")?;
    Ok(cache.join(paths::LOCK_FILE))
}

/// Held for the lifetime of the watcher
#[derive(Debug)]
pub struct InstanceLock {
    _file: File,
}

impl InstanceLock {
    pub fn acquire(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create lock directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .context(format!("Failed to open lock file {}", path.display()))?;
        if file.try_lock_exclusive().is_err() {
            return Err(AutolayoutError::AlreadyRunning(path.to_path_buf()).into());
        }
        info!(path = %path.display(), "acquired instance lock");
        Ok(Self { _file: file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_instance_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(paths::LOCK_FILE);

        let _first = InstanceLock::acquire(&path).unwrap();
        assert!(path.exists());

        let err = InstanceLock::acquire(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AutolayoutError>(),
            Some(AutolayoutError::AlreadyRunning(_))
        ));
    }

    #[test]
    fn test_lock_released_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(paths::LOCK_FILE);

        drop(InstanceLock::acquire(&path).unwrap());
        assert!(InstanceLock::acquire(&path).is_ok());
    }
}
