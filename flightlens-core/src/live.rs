//! Callsign matching against a global live-aircraft snapshot.
//!
//! The live feed returns every tracked aircraft at once; the flight is found
//! by comparing callsigns. An exact (normalized) match is preferred. Failing
//! that, the first callsign *containing* the flight number is taken. The
//! substring pass can hit unrelated aircraft for short flight numbers (`BA1`
//! matches `BA123`); it is kept as-is and documented rather than tightened.

use crate::types::LiveMatch;

/// One aircraft from the live snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveState {
    pub icao24: String,
    pub callsign: Option<String>,
}

fn normalized(callsign: &str) -> String {
    callsign.trim().to_ascii_uppercase()
}

/// Find the live state for a flight number: exact match first, then substring.
pub fn match_callsign(states: &[LiveState], flight_number: &str) -> Option<LiveMatch> {
    let wanted = normalized(flight_number);
    if wanted.is_empty() {
        return None;
    }

    let candidates = || {
        states
            .iter()
            .filter_map(|s| s.callsign.as_deref().map(|cs| (s, normalized(cs))))
            .filter(|(s, _)| !s.icao24.trim().is_empty())
    };

    let hit = candidates()
        .find(|(_, cs)| *cs == wanted)
        .or_else(|| candidates().find(|(_, cs)| cs.contains(&wanted)))?;

    let (state, callsign) = hit;
    Some(LiveMatch {
        registration: state.icao24.trim().to_string(),
        callsign,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(icao24: &str, callsign: Option<&str>) -> LiveState {
        LiveState {
            icao24: icao24.into(),
            callsign: callsign.map(Into::into),
        }
    }

    #[test]
    fn test_exact_match_preferred_over_earlier_substring() {
        let states = vec![
            state("aaaaaa", Some("XBA117Y ")),
            state("400abc", Some("BA117   ")),
        ];
        let m = match_callsign(&states, "ba117").unwrap();
        assert_eq!(m.registration, "400abc");
        assert_eq!(m.callsign, "BA117");
    }

    #[test]
    fn test_substring_fallback() {
        let states = vec![state("abc123", Some("UAL9")), state("4ca1fa", Some("EIN1234 "))];
        let m = match_callsign(&states, "IN123").unwrap();
        assert_eq!(m.registration, "4ca1fa");
        assert_eq!(m.callsign, "EIN1234");
    }

    #[test]
    fn test_short_flight_number_false_positive_is_kept() {
        let states = vec![state("0d0d0d", Some("BA123"))];
        let m = match_callsign(&states, "BA1").unwrap();
        assert_eq!(m.registration, "0d0d0d");
    }

    #[test]
    fn test_missing_callsigns_and_addresses_skipped() {
        let states = vec![state("111111", None), state("", Some("DL42"))];
        assert!(match_callsign(&states, "DL42").is_none());
    }

    #[test]
    fn test_no_match() {
        let states = vec![state("abcdef", Some("AFR10"))];
        assert!(match_callsign(&states, "LH400").is_none());
        assert!(match_callsign(&states, "  ").is_none());
        assert!(match_callsign(&[], "LH400").is_none());
    }
}
