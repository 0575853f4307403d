//! airmerge-core: Flight-feed fusion library.
//!
//! No async, no network I/O — just the fusion pipeline: unit
//! normalization, key correlation across two telemetry feeds, watch-list
//! matching, deterministic ranking, and tracking-delta detection. This
//! crate is the shared core used by the `airmerge` poller CLI.

pub mod config;
pub mod delta;
pub mod engine;
pub mod merge;
pub mod rank;
pub mod types;
pub mod units;
pub mod watchlist;

// Re-export commonly used types at crate root
pub use delta::{DeltaTracker, TrackingDelta};
pub use engine::{fuse, run_cycle, CycleOutput};
pub use merge::correlate;
pub use types::*;
pub use watchlist::{TrackMode, WatchConfig};
