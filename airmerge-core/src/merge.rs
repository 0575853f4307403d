//! Key correlator — merge join across both feeds.
//!
//! Registration is the primary key; hex code is the fallback key for
//! surveillance records without a registration. The two namespaces are
//! disjoint by construction: a feed-B record lands in exactly one index.
//! Correlation is exact-key only; no fuzzy reconciliation between a
//! feed-A registration and a feed-B hex is attempted.

use std::collections::{HashMap, HashSet};

use crate::types::{FeedARecord, FeedBRecord, FeedSource, FusedFlight, TrackedBy};
use crate::units;

/// Correlate both feeds into one fused record per unique key.
///
/// Output carries tracked fields defaulted to false/empty; the watch-list
/// pass fills them in. Ordering here follows first occurrence in the
/// inputs for reproducibility — display order comes from `rank`.
pub fn correlate(feed_a: &[FeedARecord], feed_b: &[FeedBRecord]) -> Vec<FusedFlight> {
    // Index feed B: registration primary, hex fallback. First-wins on
    // duplicate keys.
    let mut b_by_reg: HashMap<&str, &FeedBRecord> = HashMap::new();
    let mut b_by_hex_only: HashMap<&str, &FeedBRecord> = HashMap::new();
    for b in feed_b {
        let reg = b.registration.trim();
        let hex = b.hex.trim();
        if !reg.is_empty() {
            b_by_reg.entry(reg).or_insert(b);
        } else if !hex.is_empty() {
            b_by_hex_only.entry(hex).or_insert(b);
        }
    }

    let mut a_by_reg: HashMap<&str, &FeedARecord> = HashMap::new();
    for a in feed_a {
        let reg = a.registration.trim();
        if !reg.is_empty() {
            a_by_reg.entry(reg).or_insert(a);
        }
    }

    // Candidate keys in first-occurrence order: feed-A registrations,
    // feed-B registrations, then hex-only. Built from the input slices,
    // not map iteration, so two runs always agree.
    let mut keys: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for a in feed_a {
        let reg = a.registration.trim();
        if !reg.is_empty() && seen.insert(reg) {
            keys.push(reg);
        }
    }
    for b in feed_b {
        let reg = b.registration.trim();
        if !reg.is_empty() && seen.insert(reg) {
            keys.push(reg);
        }
    }
    for b in feed_b {
        if b.registration.trim().is_empty() {
            let hex = b.hex.trim();
            if !hex.is_empty() && seen.insert(hex) {
                keys.push(hex);
            }
        }
    }

    let mut fused = Vec::with_capacity(keys.len());
    for key in keys {
        let a = a_by_reg.get(key).copied();
        let b = b_by_reg
            .get(key)
            .copied()
            .or_else(|| b_by_hex_only.get(key).copied());
        fused.push(resolve(key, a, b));
    }
    fused
}

/// Resolve one fused record from whichever side(s) hold the key.
fn resolve(key: &str, a: Option<&FeedARecord>, b: Option<&FeedBRecord>) -> FusedFlight {
    let registration = match (b, a) {
        (Some(b), _) => b.registration.trim().to_string(),
        (None, Some(a)) => a.registration.trim().to_string(),
        (None, None) => String::new(),
    };
    let hex = b.map(|b| b.hex.trim().to_string()).unwrap_or_default();

    let flight_number = a.map(|a| a.flight_number.trim()).unwrap_or("");
    let b_callsign = b.map(|b| b.callsign.trim()).unwrap_or("");

    let ident = if !flight_number.is_empty() {
        flight_number
    } else {
        b_callsign
    };

    // Display fallback chain. The "—" placeholder is for records with no
    // usable identity at all.
    let callsign = if !ident.is_empty() {
        ident.to_string()
    } else if !registration.is_empty() {
        registration.clone()
    } else if !hex.is_empty() {
        format!("HEX {hex}")
    } else {
        "—".to_string()
    };

    let source = match (a, b) {
        (Some(_), Some(_)) => FeedSource::Both,
        (Some(_), None) => FeedSource::FeedA,
        _ => FeedSource::FeedB,
    };

    FusedFlight {
        key: key.to_string(),
        registration,
        hex,
        callsign,
        ident: ident.to_string(),
        source,
        airline: a.map(|a| a.airline.trim().to_string()).unwrap_or_default(),
        model: a.map(|a| a.model.trim().to_string()).unwrap_or_default(),
        altitude_m: b.and_then(|b| units::feet_to_meters(&b.altitude_ft)),
        speed_kmh: b.and_then(|b| units::knots_to_kmh(&b.speed_kts)),
        distance_km: b.and_then(|b| units::to_f64(&b.distance)).map(units::round1),
        bearing_deg: b.and_then(|b| units::to_f64(&b.bearing)).map(f64::round),
        tracked: false,
        tracked_by: TrackedBy::None,
        tracked_target: String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
