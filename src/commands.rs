//! Thin wrappers over `std::process::Command` for the external programs we drive

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

use crate::error::AutolayoutError;

fn describe<S: AsRef<OsStr>>(program: &S, args: &[S]) -> String {
    std::iter::once(program)
        .chain(args)
        .map(|s| s.as_ref().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a program to completion and return its stdout.
/// A non-zero exit is an error.
pub fn capture<S: AsRef<OsStr>>(program: S, args: &[S]) -> Result<String> {
    let command = describe(&program, args);
    let output = Command::new(&program)
        .args(args)
        .stderr(Stdio::inherit())
        .output()
        .context(format!("Failed to run `{}`", command))?;
    if !output.status.success() {
        return Err(AutolayoutError::Subprocess { command, status: output.status }.into());
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run a program and wait for it, failing on a non-zero exit
pub fn run<S: AsRef<OsStr>>(program: S, args: &[S]) -> Result<()> {
    let command = describe(&program, args);
    debug!(command = %command, "running");
    let status = Command::new(&program)
        .args(args)
        .status()
        .context(format!("Failed to run `{}`", command))?;
    if !status.success() {
        return Err(AutolayoutError::Subprocess { command, status }.into());
    }
    Ok(())
}

/// Execute a user script with no arguments
pub fn run_script(path: &Path) -> Result<()> {
    run(path.as_os_str(), &[])
}

/// Run a program, discard its stdout and ignore how it exits
pub fn fire_and_forget<S: AsRef<OsStr>>(program: S, args: &[S]) {
    let command = describe(&program, args);
    match Command::new(&program).args(args).stdout(Stdio::null()).status() {
        Ok(status) => debug!(command = %command, %status, "finished"),
        Err(e) => warn!(command = %command, error = %e, "could not start"),
    }
}
