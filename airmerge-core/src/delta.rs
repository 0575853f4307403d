//! Edge-triggered tracking-state detection.
//!
//! The only cross-cycle memory in the engine. Each observed cycle, the
//! set of active watch-list targets is diffed against the previous
//! cycle's set and then replaces it wholesale. A cycle with a failed
//! upstream fetch must simply not be observed — skipping the call is the
//! caller's responsibility, so transient data loss never fires spurious
//! "disappeared" events.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::FusedFlight;

/// Appeared/disappeared targets between two consecutive observed cycles.
/// Both lists are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackingDelta {
    pub appeared: Vec<String>,
    pub disappeared: Vec<String>,
}

impl TrackingDelta {
    pub fn is_empty(&self) -> bool {
        self.appeared.is_empty() && self.disappeared.is_empty()
    }
}

/// Holds the previous cycle's active-target set.
#[derive(Debug, Default)]
pub struct DeltaTracker {
    previous: HashSet<String>,
}

impl DeltaTracker {
    pub fn new() -> Self {
        DeltaTracker::default()
    }

    /// Diff the current cycle's active targets against the previous
    /// cycle and replace the stored set.
    pub fn observe(&mut self, flights: &[FusedFlight]) -> TrackingDelta {
        let current = active_targets(flights);
        let delta = diff(&current, &self.previous);
        self.previous = current.into_iter().collect();
        delta
    }

    pub fn previous(&self) -> &HashSet<String> {
        &self.previous
    }

    #[cfg(test)]
    pub(crate) fn with_previous<I: IntoIterator<Item = String>>(targets: I) -> Self {
        DeltaTracker {
            previous: targets.into_iter().collect(),
        }
    }
}

/// Ordered-unique tracked targets, preserving first-seen order from the
/// ranked list.
pub fn active_targets(flights: &[FusedFlight]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();
    for f in flights {
        if f.tracked && !f.tracked_target.is_empty() && seen.insert(f.tracked_target.clone()) {
            targets.push(f.tracked_target.clone());
        }
    }
    targets
}

/// Pure set difference, independent of any tracker state.
pub fn diff(current: &[String], previous: &HashSet<String>) -> TrackingDelta {
    let current_set: HashSet<&str> = current.iter().map(String::as_str).collect();

    let mut appeared: Vec<String> = current
        .iter()
        .filter(|t| !previous.contains(*t))
        .cloned()
        .collect();
    appeared.sort();

    let mut disappeared: Vec<String> = previous
        .iter()
        .filter(|t| !current_set.contains(t.as_str()))
        .cloned()
        .collect();
    disappeared.sort();

    TrackingDelta { appeared, disappeared }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
