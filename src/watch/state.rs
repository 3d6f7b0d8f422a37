use crate::identity::Fingerprint;

/// What the loop remembers between polls: the last configuration it acted on.
/// `None` until the first change, so the first poll always counts as a change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchState {
    pub previous: Option<Fingerprint>,
}

impl WatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_current(&self, fingerprint: &Fingerprint) -> bool {
        self.previous.as_ref() == Some(fingerprint)
    }
}

/// Result of a single poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Unchanged,
    Changed {
        fingerprint: Fingerprint,
        /// `false` when the fallback command ran instead of a layout script
        script_applied: bool,
        /// `false` when the resource file could not be written
        published: bool,
    },
}
