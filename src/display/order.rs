use tracing::debug;

use crate::types::DisplayRecord;

/// Order displays left to right by their offset, then bring the primary
/// display to the front by rotating the ones before it to the back.
///
/// Without a primary display the positional order is returned untouched.
pub fn order_displays(mut records: Vec<DisplayRecord>) -> Vec<DisplayRecord> {
    records.sort_by(|a, b| {
        position_key(a)
            .cmp(&position_key(b))
            .then_with(|| a.name.cmp(&b.name))
    });

    match records.iter().position(|r| r.is_primary) {
        Some(index) => records.rotate_left(index),
        None => debug!(count = records.len(), "no primary display, keeping positional order"),
    }
    records
}

fn position_key(record: &DisplayRecord) -> u64 {
    record.geometry.map_or(0, |g| g.position_key())
}
