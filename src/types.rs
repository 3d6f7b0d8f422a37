//! Display records and the value types derived from them

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::display::classify;
use crate::error::AutolayoutError;

static GEOMETRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)x(\d+)\+(\d+)\+(\d+)$").expect("geometry pattern is valid")
});

/// Size and offset of an active display, as xrandr prints it (`WxH+X+Y`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

impl Geometry {
    pub fn new(width: u32, height: u32, x: u32, y: u32) -> Self {
        Self { width, height, x, y }
    }

    /// Sort key used by the orderer: `(y + 1) * x`
    pub fn position_key(&self) -> u64 {
        (u64::from(self.y) + 1) * u64::from(self.x)
    }
}

impl FromStr for Geometry {
    type Err = AutolayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AutolayoutError::Geometry(s.to_string());
        let caps = GEOMETRY_PATTERN.captures(s).ok_or_else(malformed)?;
        let field = |i: usize| caps[i].parse::<u32>().map_err(|_| malformed());
        Ok(Self::new(field(1)?, field(2)?, field(3)?, field(4)?))
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Rotation hint from the enumeration line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Normal,
    Left,
    Right,
}

impl Rotation {
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint {
            "normal" => Some(Self::Normal),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn is_sideways(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Ultrawide,
    Landscape,
    Portrait,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ultrawide => "ultrawide",
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
        })
    }
}

/// i3 container layout suggested for workspaces on a display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    SplitH,
    SplitV,
    Tabbed,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SplitH => "splith",
            Self::SplitV => "splitv",
            Self::Tabbed => "tabbed",
        })
    }
}

/// One connected display from a single poll.
/// Orientation and layout are derived at construction and never set directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub name: String,
    pub is_primary: bool,
    pub geometry: Option<Geometry>,
    pub rotation: Option<Rotation>,
    orientation: Option<Orientation>,
    layout: Option<Layout>,
}

impl DisplayRecord {
    pub fn new(
        name: impl Into<String>,
        is_primary: bool,
        geometry: Option<Geometry>,
        rotation: Option<Rotation>,
    ) -> Self {
        let (orientation, layout) = match geometry.and_then(|g| classify::classify(&g, rotation)) {
            Some((orientation, layout)) => (Some(orientation), Some(layout)),
            None => (None, None),
        };
        Self {
            name: name.into(),
            is_primary,
            geometry,
            rotation,
            orientation,
            layout,
        }
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    pub fn layout(&self) -> Option<Layout> {
        self.layout
    }
}
