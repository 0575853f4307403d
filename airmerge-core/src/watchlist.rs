//! Watch-list matching — decide tracked status per fused flight.
//!
//! Matching is set membership on normalized (trimmed, upper-cased)
//! strings. In `Both` mode the callsign dimension is checked first;
//! registration only gets a look when the callsign did not match.

use std::collections::HashSet;

use crate::types::{FusedFlight, TrackedBy};

/// Watch-list match dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackMode {
    #[default]
    Callsign,
    Registration,
    Both,
}

impl TrackMode {
    /// Parse a configured mode string. Anything unrecognized falls back
    /// to `Callsign` — configuration never fails the engine.
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "registration" => TrackMode::Registration,
            "both" => TrackMode::Both,
            _ => TrackMode::Callsign,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackMode::Callsign => "callsign",
            TrackMode::Registration => "registration",
            TrackMode::Both => "both",
        }
    }
}

/// Watch-list configuration, normalized and ready for matching.
#[derive(Debug, Clone, Default)]
pub struct WatchConfig {
    pub enabled: bool,
    pub mode: TrackMode,
    pub callsigns: HashSet<String>,
    pub registrations: HashSet<String>,
}

impl WatchConfig {
    /// Build from raw comma-separated configuration text.
    pub fn from_lists(enabled: bool, mode: TrackMode, callsigns: &str, registrations: &str) -> Self {
        WatchConfig {
            enabled,
            mode,
            callsigns: parse_list(callsigns).into_iter().collect(),
            registrations: parse_list(registrations).into_iter().collect(),
        }
    }

    pub fn disabled() -> Self {
        WatchConfig::default()
    }
}

/// Split raw configuration text on commas, trim, upper-case, drop empties.
pub fn parse_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim().to_uppercase())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Result of one watch-list check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchMatch {
    pub tracked: bool,
    pub tracked_by: TrackedBy,
    pub target: String,
}

impl WatchMatch {
    fn miss() -> Self {
        WatchMatch {
            tracked: false,
            tracked_by: TrackedBy::None,
            target: String::new(),
        }
    }
}

/// Check one flight identity against the watch-list.
///
/// Callsign wins over registration in `Both` mode; a flight matching on
/// both dimensions is reported under its callsign.
pub fn check(callsign: &str, registration: &str, cfg: &WatchConfig) -> WatchMatch {
    if !cfg.enabled {
        return WatchMatch::miss();
    }

    let cs = callsign.trim().to_uppercase();
    let reg = registration.trim().to_uppercase();

    if matches!(cfg.mode, TrackMode::Callsign | TrackMode::Both)
        && !cs.is_empty()
        && cfg.callsigns.contains(&cs)
    {
        return WatchMatch {
            tracked: true,
            tracked_by: TrackedBy::Callsign,
            target: cs,
        };
    }
    if matches!(cfg.mode, TrackMode::Registration | TrackMode::Both)
        && !reg.is_empty()
        && cfg.registrations.contains(&reg)
    {
        return WatchMatch {
            tracked: true,
            tracked_by: TrackedBy::Registration,
            target: reg,
        };
    }
    WatchMatch::miss()
}

/// Fill in the tracked fields on every fused flight.
pub fn apply(flights: &mut [FusedFlight], cfg: &WatchConfig) {
    for f in flights {
        let m = check(&f.ident, &f.registration, cfg);
        f.tracked = m.tracked;
        f.tracked_by = m.tracked_by;
        f.tracked_target = m.target;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(mode: TrackMode, callsigns: &str, regs: &str) -> WatchConfig {
        WatchConfig::from_lists(true, mode, callsigns, regs)
    }

    #[test]
    fn test_disabled_never_matches() {
        let mut c = cfg(TrackMode::Callsign, "LH123", "");
        c.enabled = false;
        assert_eq!(check("LH123", "", &c), WatchMatch::miss());
    }

    #[test]
    fn test_callsign_match() {
        let c = cfg(TrackMode::Callsign, "LH123, BA456", "");
        let m = check("lh123", "", &c);
        assert!(m.tracked);
        assert_eq!(m.tracked_by, TrackedBy::Callsign);
        assert_eq!(m.target, "LH123");
    }

    #[test]
    fn test_registration_match() {
        let c = cfg(TrackMode::Registration, "", "D-ABCD");
        let m = check("", "d-abcd", &c);
        assert!(m.tracked);
        assert_eq!(m.tracked_by, TrackedBy::Registration);
        assert_eq!(m.target, "D-ABCD");
    }

    #[test]
    fn test_both_mode_callsign_priority() {
        // Matches on both dimensions — callsign must win.
        let c = cfg(TrackMode::Both, "LH123", "D-ABCD");
        let m = check("LH123", "D-ABCD", &c);
        assert!(m.tracked);
        assert_eq!(m.tracked_by, TrackedBy::Callsign);
        assert_eq!(m.target, "LH123");
    }

    #[test]
    fn test_both_mode_falls_through_to_registration() {
        let c = cfg(TrackMode::Both, "LH123", "D-ABCD");
        let m = check("BA999", "D-ABCD", &c);
        assert!(m.tracked);
        assert_eq!(m.tracked_by, TrackedBy::Registration);
    }

    #[test]
    fn test_callsign_mode_ignores_registration() {
        let c = cfg(TrackMode::Callsign, "LH123", "D-ABCD");
        assert!(!check("BA999", "D-ABCD", &c).tracked);
    }

    #[test]
    fn test_empty_inputs_never_match() {
        // An empty string in the watch-list text must not make empty
        // identities match.
        let c = cfg(TrackMode::Both, ", ,", ",");
        assert!(!check("", "", &c).tracked);
        assert!(c.callsigns.is_empty());
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list(" lh123, ba456 ,,"), vec!["LH123", "BA456"]);
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_parse_or_default() {
        assert_eq!(TrackMode::parse_or_default("callsign"), TrackMode::Callsign);
        assert_eq!(TrackMode::parse_or_default("REGISTRATION"), TrackMode::Registration);
        assert_eq!(TrackMode::parse_or_default("both"), TrackMode::Both);
        assert_eq!(TrackMode::parse_or_default("bogus"), TrackMode::Callsign);
        assert_eq!(TrackMode::parse_or_default(""), TrackMode::Callsign);
    }
}
