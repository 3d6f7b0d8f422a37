use crate::constants::classify::ULTRAWIDE_ASPECT;
use crate::types::{Geometry, Layout, Orientation, Rotation};

/// Derive orientation and preferred i3 layout for an active display.
///
/// A sideways rotation wins over the aspect ratio. Returns `None` for a zero
/// height, which callers treat the same as a display without geometry.
pub fn classify(geometry: &Geometry, rotation: Option<Rotation>) -> Option<(Orientation, Layout)> {
    if geometry.height == 0 {
        return None;
    }
    let aspect = f64::from(geometry.width) / f64::from(geometry.height);

    Some(if rotation.is_some_and(Rotation::is_sideways) {
        (Orientation::Portrait, Layout::SplitV)
    } else if aspect > ULTRAWIDE_ASPECT {
        (Orientation::Ultrawide, Layout::SplitH)
    } else if aspect > 0.0 {
        (Orientation::Landscape, Layout::Tabbed)
    } else {
        (Orientation::Portrait, Layout::SplitV)
    })
}
