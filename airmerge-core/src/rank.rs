//! Deterministic ordering of fused flights.
//!
//! Hard contract: two engines fed identical inputs must produce identical
//! output order. Tracked flights first, then by source completeness,
//! then nearest first, with a lexicographic identity tie-break so the
//! order never depends on input arrival order.

use std::cmp::Ordering;

use crate::types::{FeedSource, FusedFlight};

/// Sort fused flights into display order.
pub fn rank(mut flights: Vec<FusedFlight>) -> Vec<FusedFlight> {
    flights.sort_by(compare);
    flights
}

fn compare(x: &FusedFlight, y: &FusedFlight) -> Ordering {
    (tracked_rank(x), source_rank(&x.source))
        .cmp(&(tracked_rank(y), source_rank(&y.source)))
        .then_with(|| distance_key(x).total_cmp(&distance_key(y)))
        .then_with(|| tie_break(x).cmp(tie_break(y)))
}

fn tracked_rank(f: &FusedFlight) -> u8 {
    u8::from(!f.tracked)
}

fn source_rank(source: &FeedSource) -> u8 {
    match source {
        FeedSource::Both => 0,
        FeedSource::FeedB => 1,
        FeedSource::FeedA => 2,
    }
}

/// Unknown distance sorts after every known one.
fn distance_key(f: &FusedFlight) -> f64 {
    f.distance_km.unwrap_or(f64::INFINITY)
}

fn tie_break(f: &FusedFlight) -> &str {
    if !f.registration.is_empty() {
        &f.registration
    } else if !f.hex.is_empty() {
        &f.hex
    } else {
        &f.key
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TrackedBy;

    fn flight(key: &str, source: FeedSource, distance_km: Option<f64>, tracked: bool) -> FusedFlight {
        FusedFlight {
            key: key.into(),
            registration: key.into(),
            hex: String::new(),
            callsign: key.into(),
            ident: String::new(),
            source,
            airline: String::new(),
            model: String::new(),
            altitude_m: None,
            speed_kmh: None,
            distance_km,
            bearing_deg: None,
            tracked,
            tracked_by: TrackedBy::None,
            tracked_target: String::new(),
        }
    }

    fn keys(flights: &[FusedFlight]) -> Vec<&str> {
        flights.iter().map(|f| f.key.as_str()).collect()
    }

    #[test]
    fn test_tracked_first() {
        let ranked = rank(vec![
            flight("A", FeedSource::Both, Some(1.0), false),
            flight("B", FeedSource::FeedA, None, true),
        ]);
        assert_eq!(keys(&ranked), vec!["B", "A"]);
    }

    #[test]
    fn test_source_completeness_order() {
        let ranked = rank(vec![
            flight("A", FeedSource::FeedA, None, false),
            flight("B", FeedSource::FeedB, None, false),
            flight("C", FeedSource::Both, None, false),
        ]);
        assert_eq!(keys(&ranked), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_distance_ascending_null_last() {
         let ranked = rank(vec![
            flight("A", FeedSource::FeedB, None, false),
            flight("B", FeedSource::FeedB, Some(50.0), false),
            flight("C", FeedSource::FeedB, Some(3.2), false),
        ]);
        assert_eq!(keys(&ranked), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_lexicographic_tie_break() {
        let ranked = rank(vec![
            flight("D-CCCC", FeedSource::FeedB, Some(5.0), false),
            flight("D-AAAA", FeedSource::FeedB, Some(5.0), false),
            flight("D-BBBB", FeedSource::FeedB, Some(5.0), false),
        ]);
        assert_eq!(keys(&ranked), vec!["D-AAAA", "D-BBBB", "D-CCCC"]);
    }

    #[test]
    fn test_tie_break_falls_back_to_hex() {
        let mut a = flight("zzz", FeedSource::FeedB, None, false);
        a.registration = String::new();
        a.hex = "aaa111".into();
        let mut b = flight("yyy", FeedSource::FeedB, None, false);
        b.registration = String::new();
        b.hex = "bbb222".into();

        let ranked = rank(vec![b, a]);
        assert_eq!(ranked[0].hex, "aaa111");
    }

    #[test]
    fn test_order_independent_of_input_order() {
        let a = flight("D-AAAA", FeedSource::Both, Some(2.0), false);
        let b = flight("D-BBBB", FeedSource::FeedB, Some(1.0), true);
        let c = flight("D-CCCC", FeedSource::FeedA, None, false);

        let one = rank(vec![a.clone(), b.clone(), c.clone()]);
        let two = rank(vec![c, a, b]);
        assert_eq!(keys(&one), keys(&two));
    }
}
