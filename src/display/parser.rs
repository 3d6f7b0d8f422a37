use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::types::{DisplayRecord, Geometry, Rotation};

static CONNECTED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+) connected(?: (primary))?(?: (\S*\d+x\d+\S*))?(?: (left|right|normal))?(?:\s|$)")
        .expect("connected-line pattern is valid")
});

/// Parse `xrandr` enumeration output into connected display records.
///
/// Only `<name> connected ...` lines are kept; anything else (the screen
/// line, mode lines, disconnected outputs) is dropped. A connected display
/// whose geometry token is missing or malformed is kept without geometry.
/// The result is sorted by name.
pub fn parse_displays(text: &str) -> Vec<DisplayRecord> {
    let mut seen = HashSet::new();
    let mut records: Vec<DisplayRecord> = text
        .lines()
        .filter_map(parse_line)
        .filter(|record| seen.insert(record.name.clone()))
        .collect();
    records.sort_by(|a, b| a.name.cmp(&b.name));
    records
}

fn parse_line(line: &str) -> Option<DisplayRecord> {
    let caps = CONNECTED_LINE.captures(line)?;
    let name = &caps[1];
    let is_primary = caps.get(2).is_some();

    let geometry = caps.get(3).and_then(|token| {
        token
            .as_str()
            .parse::<Geometry>()
            .inspect_err(|e| debug!(display = %name, error = %e, "ignoring geometry"))
            .ok()
    });
    // A rotation hint means nothing for an inactive output
    let rotation = geometry
        .and(caps.get(4))
        .and_then(|hint| Rotation::from_hint(hint.as_str()));

    Some(DisplayRecord::new(name, is_primary, geometry, rotation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Layout, Orientation};

    const LAPTOP_AND_PORTRAIT: &str = "\
Screen 0: minimum 320 x 200, current 3000 x 1920, maximum 16384 x 16384
eDP-1 connected primary 1920x1080+0+0 (normal left inverted right x axis y axis) 344mm x 194mm
   1920x1080     60.02*+  59.93
   1680x1050     59.88
HDMI-1 connected 1080x1920+1920+0 left (normal left inverted right x axis y axis) 527mm x 296mm
   1920x1080     60.00*+
DP-1 disconnected (normal left inverted right x axis y axis)
DP-2 connected (normal left inverted right x axis y axis)
   2560x1440     59.95 +
";

    fn names(records: &[DisplayRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_parse_real_output() {
        let records = parse_displays(LAPTOP_AND_PORTRAIT);
        assert_eq!(names(&records), vec!["DP-2", "HDMI-1", "eDP-1"]);

        let dp2 = &records[0];
        assert!(!dp2.is_primary);
        assert_eq!(dp2.geometry, None);
        assert_eq!(dp2.orientation(), None);
        assert_eq!(dp2.layout(), None);

        let hdmi = &records[1];
        assert_eq!(hdmi.geometry, Some(Geometry::new(1080, 1920, 1920, 0)));
        assert_eq!(hdmi.rotation, Some(Rotation::Left));
        assert_eq!(hdmi.orientation(), Some(Orientation::Portrait));
        assert_eq!(hdmi.layout(), Some(Layout::SplitV));

        let edp = &records[2];
        assert!(edp.is_primary);
        assert_eq!(edp.rotation, None);
        assert_eq!(edp.orientation(), Some(Orientation::Landscape));
    }

    #[test]
    fn test_two_connected_displays() {
        let records = parse_displays(
            "eDP-1 connected primary 1920x1080+0+0\nHDMI-1 connected 1920x1080+1920+0",
        );
        assert_eq!(names(&records), vec!["HDMI-1", "eDP-1"]);
        let edp = &records[1];
        assert!(edp.is_primary);
        assert_eq!(edp.geometry.map(|g| g.to_string()).as_deref(), Some("1920x1080+0+0"));
        for record in &records {
            assert_eq!(record.orientation(), Some(Orientation::Landscape));
            assert_eq!(record.layout(), Some(Layout::Tabbed));
        }
    }

    #[test]
    fn test_disconnected_lines_are_excluded() {
        let records = parse_displays(
            "DP-1 disconnected\nVGA-1 disconnected primary\nHDMI-2 connected 1280x1024+0+0",
        );
        assert_eq!(names(&records), vec!["HDMI-2"]);
    }

    #[test]
    fn test_malformed_geometry_is_treated_as_absent() {
        let records = parse_displays("HDMI-1 connected 1920x1080+0 (normal left)");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].geometry, None);
        assert_eq!(records[0].orientation(), None);
        assert_eq!(records[0].layout(), None);
    }

    #[test]
    fn test_zero_height_is_treated_as_absent_tags() {
        let records = parse_displays("HDMI-1 connected 1920x0+0+0");
        assert_eq!(records[0].geometry, Some(Geometry::new(1920, 0, 0, 0)));
        assert_eq!(records[0].orientation(), None);
    }

    #[test]
    fn test_right_rotation_and_ultrawide() {
        let records = parse_displays(
            "DP-3 connected 1440x3440+0+0 right (normal left inverted right)\nDP-4 connected 3440x1440+1440+0 (normal)",
        );
        assert_eq!(records[0].orientation(), Some(Orientation::Portrait));
        assert_eq!(records[1].orientation(), Some(Orientation::Ultrawide));
        assert_eq!(records[1].layout(), Some(Layout::SplitH));
    }

    #[test]
    fn test_output_is_sorted_and_deduplicated() {
        let records = parse_displays(
            "eDP-1 connected 1920x1080+0+0\nDP-1 connected 1920x1080+1920+0\neDP-1 connected primary 800x600+0+0",
        );
        assert_eq!(names(&records), vec!["DP-1", "eDP-1"]);
        assert!(!records[1].is_primary);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_displays("").is_empty());
        assert!(parse_displays("Screen 0: minimum 8 x 8").is_empty());
    }
}
