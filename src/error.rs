use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Failures the change loop distinguishes between.
///
/// Everything except `AlreadyRunning` and `DisplayServerLost` is recovered
/// from inside a single poll tick; the next tick acts as the retry.
#[derive(Debug, Error)]
pub enum AutolayoutError {
    /// Geometry token that does not match `WxH+X+Y`
    #[error("malformed geometry '{0}'")]
    Geometry(String),

    #[error("no layout script at {}", .0.display())]
    ScriptNotFound(PathBuf),

    #[error("layout script {} is not executable", .0.display())]
    ScriptNotExecutable(PathBuf),

    #[error("`{command}` exited with {status}")]
    Subprocess { command: String, status: ExitStatus },

    #[error("no connected displays reported")]
    MissingDisplayData,

    /// The X connection is gone; no later poll can succeed
    #[error("lost connection to the X server")]
    DisplayServerLost,

    #[error("another instance already holds {}", .0.display())]
    AlreadyRunning(PathBuf),
}
