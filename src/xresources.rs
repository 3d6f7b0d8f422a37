//! Rendering of the `~/.Xresources.d/i3` fragment
//!
//! The i3 config reads outputs back with `set_from_resource`, e.g.
//! `set_from_resource $primary i3.output.primary.name eDP-1`.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::constants::xresources::{ALIASES, PREFIX};
use crate::types::DisplayRecord;

const HEADER: &str = "\
! ~/.Xresources.d/i3
! Generated by xrandr-autolayout, rewritten on every display change.

! Make sure to include this file from ~/.Xresources by adding
! #include \"~/.Xresources.d/i3\"

! output index 0 is the primary monitor, hence i3.output.0 == i3.output.primary
! output index 1 is the first secondary monitor, hence i3.output.1 == i3.output.secondary
! output index 2 is the next one, hence i3.output.2 == i3.output.third
";

/// Render resource lines for the first three ordered displays
pub fn render(records: &[DisplayRecord]) -> String {
    let mut data = String::from(HEADER);
    for (index, (record, alias)) in records.iter().zip(ALIASES).enumerate() {
        data.push('\n');
        push_output(&mut data, &index.to_string(), record);
        push_output(&mut data, alias, record);
    }
    data
}

fn push_output(data: &mut String, key: &str, record: &DisplayRecord) {
    // fmt::Write on String never fails
    let _ = writeln!(data, "{PREFIX}.{key}: {}", record.name);
    let _ = writeln!(data, "{PREFIX}.{key}.name: {}", record.name);
    if let Some(orientation) = record.orientation() {
        let _ = writeln!(data, "{PREFIX}.{key}.orientation: {orientation}");
    }
    if let Some(layout) = record.layout() {
        let _ = writeln!(data, "{PREFIX}.{key}.layout: {layout}");
    }
}

/// Replace the resource file, creating its directory if needed
pub fn write(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .context(format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).context(format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote xresources");
    Ok(())
}
