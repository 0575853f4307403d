//! Unit conversion with failure-to-null semantics.
//!
//! Every function here is total: unparseable input degrades to `None`,
//! never an error. Partial telemetry is the normal case — receivers put
//! `"ground"` in altitude slots and omit fields freely.

use serde_json::Value;

const FEET_TO_METERS: f64 = 0.3048;
const KNOTS_TO_KMH: f64 = 1.852;

/// Best-effort numeric coercion. Numbers pass through; strings are
/// trimmed and parsed; everything else (null, bool, arrays) is `None`.
pub fn to_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Barometric altitude in feet → meters, rounded to whole meters.
pub fn feet_to_meters(v: &Value) -> Option<f64> {
    Some((to_f64(v)? * FEET_TO_METERS).round())
}

/// Ground speed in knots → km/h, rounded to whole km/h.
pub fn knots_to_kmh(v: &Value) -> Option<f64> {
    Some((to_f64(v)? * KNOTS_TO_KMH).round())
}

/// Round to one decimal place (receiver distance readout).
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
