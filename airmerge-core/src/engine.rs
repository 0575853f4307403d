//! One-call-per-tick fusion pipeline.
//!
//! correlate → watch-match → rank → delta, synchronous, no I/O. The
//! caller owns one `DeltaTracker` and one `WatchConfig` per configured
//! source and passes them in explicitly; there is no ambient state.

use crate::delta::{self, DeltaTracker, TrackingDelta};
use crate::merge;
use crate::rank;
use crate::types::{FeedARecord, FeedBRecord, FusedFlight};
use crate::watchlist::{self, WatchConfig};

/// Everything one polling cycle produces.
#[derive(Debug, Clone)]
pub struct CycleOutput {
    /// Fused flights in display order.
    pub flights: Vec<FusedFlight>,
    /// Ordered-unique active watch-list targets this cycle.
    pub active_targets: Vec<String>,
    pub delta: TrackingDelta,
    pub feed_a_count: usize,
    pub feed_b_count: usize,
}

/// Correlate, match, and rank one cycle's worth of records without
/// touching delta state. Used for one-shot merges and by `run_cycle`.
pub fn fuse(feed_a: &[FeedARecord], feed_b: &[FeedBRecord], cfg: &WatchConfig) -> Vec<FusedFlight> {
    let mut flights = merge::correlate(feed_a, feed_b);
    watchlist::apply(&mut flights, cfg);
    rank::rank(flights)
}

/// Run one full polling cycle.
///
/// Must not be called for a cycle whose upstream fetch failed; skipping
/// the call is what prevents spurious "disappeared" events.
pub fn run_cycle(
    feed_a: &[FeedARecord],
    feed_b: &[FeedBRecord],
    cfg: &WatchConfig,
    tracker: &mut DeltaTracker,
) -> CycleOutput {
    let flights = fuse(feed_a, feed_b, cfg);
    let active_targets = delta::active_targets(&flights);
    let delta = tracker.observe(&flights);

    CycleOutput {
        active_targets,
        delta,
        feed_a_count: feed_a.len(),
        feed_b_count: feed_b.len(),
        flights,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
