//! Wire-format parsing for both feed documents.
//!
//! Feed A is a commercial tracker export: `{ "flights": [...] }` with
//! registration/flight-number/airline/model per entry. Feed B is a
//! dump1090-style receiver document: `{ "now", "messages",
//! "aircraft": [...] }` with hex, optional registration (`r`), optional
//! callsign (`flight`), and kinematics. Both parsers are tolerant:
//! missing or null fields become empty strings or stay loosely typed
//! for the core's failure-to-null coercion.

use serde::Deserialize;
use serde_json::Value;

use airmerge_core::types::{AirmergeError, FeedARecord, FeedBRecord, Result};

// ---------------------------------------------------------------------------
// Feed A — commercial tracker
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct FeedADoc {
    #[serde(default)]
    pub flights: Vec<FeedAWire>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedAWire {
    #[serde(default)]
    pub aircraft_registration: Option<String>,
    #[serde(default)]
    pub flight_number: Option<String>,
    #[serde(default)]
    pub airline_short: Option<String>,
    #[serde(default)]
    pub aircraft_model: Option<String>,
}

impl FeedADoc {
    pub fn into_records(self) -> Vec<FeedARecord> {
        self.flights
            .into_iter()
            .map(|w| FeedARecord {
                registration: w.aircraft_registration.unwrap_or_default(),
                flight_number: w.flight_number.unwrap_or_default(),
                airline: w.airline_short.unwrap_or_default(),
                model: w.aircraft_model.unwrap_or_default(),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Feed B — local surveillance receiver
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct FeedBDoc {
    #[serde(default)]
    pub now: Option<f64>,
    #[serde(default)]
    pub messages: Option<u64>,
    #[serde(default)]
    pub aircraft: Vec<FeedBWire>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedBWire {
    #[serde(default)]
    pub hex: Option<String>,
    #[serde(default)]
    pub r: Option<String>,
    #[serde(default)]
    pub flight: Option<String>,
    #[serde(default)]
    pub alt_baro: Value,
    #[serde(default)]
    pub gs: Value,
    #[serde(default)]
    pub r_dst: Value,
    #[serde(default)]
    pub r_dir: Value,
}

impl FeedBDoc {
    pub fn into_records(self) -> Vec<FeedBRecord> {
        self.aircraft
            .into_iter()
            .map(|w| FeedBRecord {
                hex: w.hex.unwrap_or_default(),
                registration: w.r.unwrap_or_default(),
                callsign: w.flight.unwrap_or_default(),
                altitude_ft: w.alt_baro,
                speed_kts: w.gs,
                distance: w.r_dst,
                bearing: w.r_dir,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Parsing entry points
// ---------------------------------------------------------------------------

pub fn parse_feed_a(text: &str) -> Result<FeedADoc> {
    serde_json::from_str(text).map_err(|e| AirmergeError::Feed(format!("feed A parse: {e}")))
}

pub fn parse_feed_b(text: &str) -> Result<FeedBDoc> {
    serde_json::from_str(text).map_err(|e| AirmergeError::Feed(format!("feed B parse: {e}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
