//! Shared types and error enum for airmerge-core.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// All errors produced by airmerge-core.
///
/// The fusion path itself is total and never returns one of these; they
/// only surface at the config/file edges and from the poller.
#[derive(Debug, Error)]
pub enum AirmergeError {
    #[error("config error: {0}")]
    Config(String),
    #[error("feed error: {0}")]
    Feed(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AirmergeError>;

// ---------------------------------------------------------------------------
// Raw feed records
// ---------------------------------------------------------------------------

/// One record from the commercial tracker feed (feed A).
///
/// Keyed by aircraft registration. A record with an empty registration
/// contributes nothing to correlation.
#[derive(Debug, Clone, Default)]
pub struct FeedARecord {
    pub registration: String,
    pub flight_number: String,
    pub airline: String,
    pub model: String,
}

/// One record from the local surveillance feed (feed B).
///
/// Keyed by transponder hex code, optionally carrying a registration.
/// The kinematic fields stay loosely typed (`serde_json::Value`) because
/// real receiver output puts strings like `"ground"` in numeric slots;
/// the `units` module owns coercion with failure-to-null semantics.
#[derive(Debug, Clone, Default)]
pub struct FeedBRecord {
    pub hex: String,
    pub registration: String,
    pub callsign: String,
    pub altitude_ft: Value,
    pub speed_kts: Value,
    pub distance: Value,
    pub bearing: Value,
}

// ---------------------------------------------------------------------------
// Fused output
// ---------------------------------------------------------------------------

/// Which feed(s) contributed to a fused flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeedSource {
    FeedA,
    FeedB,
    Both,
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedSource::FeedA => write!(f, "FEED_A"),
            FeedSource::FeedB => write!(f, "FEED_B"),
            FeedSource::Both => write!(f, "BOTH"),
        }
    }
}

/// Which watch-list dimension a flight matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TrackedBy {
    #[default]
    None,
    Callsign,
    Registration,
}

impl std::fmt::Display for TrackedBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackedBy::None => write!(f, ""),
            TrackedBy::Callsign => write!(f, "callsign"),
            TrackedBy::Registration => write!(f, "registration"),
        }
    }
}

/// One correlated flight for one polling cycle.
///
/// Built fresh each cycle by the correlator, never mutated afterwards
/// except for the tracked fields which the watch-list pass fills in.
/// `key` is the registration, or the hex code when no registration is
/// known; it is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusedFlight {
    pub key: String,
    pub registration: String,
    pub hex: String,
    /// Display string: flight number, else feed-B callsign, else
    /// registration, else "HEX <hex>", else "—".
    pub callsign: String,
    /// Raw identity for watch-list matching: feed-A flight number, else
    /// feed-B callsign. May be empty; never a registration fallback.
    pub ident: String,
    pub source: FeedSource,
    pub airline: String,
    pub model: String,
    pub altitude_m: Option<f64>,
    pub speed_kmh: Option<f64>,
    pub distance_km: Option<f64>,
    pub bearing_deg: Option<f64>,
    pub tracked: bool,
    pub tracked_by: TrackedBy,
    pub tracked_target: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
