//! Flight-number input handling and multi-flight itinerary helpers.
//!
//! Input is one flight number or several separated by commas. Each is
//! trimmed and upper-cased; blanks are dropped. Two consecutive flights get a
//! connection time, flagged when it is under an hour.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{FlightLensError, FlightSnapshot, Result};

/// Validation message for empty flight-number input.
pub const EMPTY_FLIGHT_NUMBER: &str = "Please enter a valid flight number";

/// Connections shorter than this are flagged as tight.
pub const SHORT_CONNECTION_MINUTES: i64 = 60;

/// Validate a single flight number. Returns it trimmed and upper-cased.
pub fn validate_flight_number(input: &str) -> Result<String> {
    let number = input.trim().to_ascii_uppercase();
    if number.is_empty() {
        return Err(FlightLensError::InvalidInput(EMPTY_FLIGHT_NUMBER.into()));
    }
    Ok(number)
}

/// Split comma-separated input into normalized flight numbers.
pub fn parse_flight_numbers(input: &str) -> Result<Vec<String>> {
    let numbers: Vec<String> = input
        .split(',')
        .map(|f| f.trim().to_ascii_uppercase())
        .filter(|f| !f.is_empty())
        .collect();
    if numbers.is_empty() {
        return Err(FlightLensError::InvalidInput(EMPTY_FLIGHT_NUMBER.into()));
    }
    Ok(numbers)
}

/// Layover between two flights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectionTime {
    pub hours: i64,
    pub minutes: i64,
    pub is_short: bool,
}

/// Time from one flight's arrival to the next one's departure. `None` when
/// the second flight leaves at or before the first lands.
pub fn connection_between(
    arrival: DateTime<Utc>,
    next_departure: DateTime<Utc>,
) -> Option<ConnectionTime> {
    if next_departure <= arrival {
        return None;
    }
    let total = (next_departure - arrival).num_minutes();
    Some(ConnectionTime {
        hours: total / 60,
        minutes: total % 60,
        is_short: total < SHORT_CONNECTION_MINUTES,
    })
}

/// Connection time for a two-flight itinerary. Other lengths have none.
pub fn itinerary_connection(flights: &[FlightSnapshot]) -> Option<ConnectionTime> {
    match flights {
        [first, second] => connection_between(first.arrival.scheduled, second.departure.scheduled),
        _ => None,
    }
}

/// Scheduled block time, `"<h>h <m>m"`. Negative schedules read as `0h 0m`.
pub fn flight_duration(flight: &FlightSnapshot) -> String {
    let total = (flight.arrival.scheduled - flight.departure.scheduled)
        .num_minutes()
        .max(0);
    format!("{}h {}m", total / 60, total % 60)
}

/// Percentage of scheduled block time elapsed at `now`, clamped to 0–100.
pub fn flight_progress(flight: &FlightSnapshot, now: DateTime<Utc>) -> f64 {
    let departs = flight.departure.scheduled;
    let arrives = flight.arrival.scheduled;
    if now < departs {
        return 0.0;
    }
    if now > arrives {
        return 100.0;
    }
    let total = (arrives - departs).num_milliseconds() as f64;
    if total <= 0.0 {
        return 100.0;
    }
    let elapsed = (now - departs).num_milliseconds() as f64;
    (elapsed / total * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlightEndpoint;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, h, m, 0).unwrap()
    }

    fn flight(number: &str, departs: DateTime<Utc>, arrives: DateTime<Utc>) -> FlightSnapshot {
        let end = |iata: &str, scheduled| FlightEndpoint {
            airport: iata.into(),
            iata: iata.into(),
            scheduled,
            timezone: "UTC".into(),
            terminal: None,
            gate: None,
        };
        FlightSnapshot {
            flight_number: number.into(),
            airline: "Test Air".into(),
            status: "scheduled".into(),
            departure: end("AAA", departs),
            arrival: end("BBB", arrives),
            aircraft: None,
        }
    }

    #[test]
    fn test_parse_single_and_multiple() {
        assert_eq!(parse_flight_numbers(" ba117 ").unwrap(), vec!["BA117"]);
        assert_eq!(
            parse_flight_numbers("ua1, ,LH400 ,").unwrap(),
            vec!["UA1", "LH400"]
        );
    }

    #[test]
    fn test_parse_empty_is_validation_error() {
        for input in ["", "   ", ", ,"] {
            match parse_flight_numbers(input) {
                Err(FlightLensError::InvalidInput(msg)) => assert_eq!(msg, EMPTY_FLIGHT_NUMBER),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
        assert!(validate_flight_number(" ").is_err());
        assert_eq!(validate_flight_number(" dl42").unwrap(), "DL42");
    }

    #[test]
    fn test_connection_time() {
        let c = connection_between(at(10, 0), at(12, 35)).unwrap();
        assert_eq!(c, ConnectionTime { hours: 2, minutes: 35, is_short: false });

        let c = connection_between(at(10, 0), at(10, 45)).unwrap();
        assert!(c.is_short);
        assert_eq!((c.hours, c.minutes), (0, 45));
    }

    #[test]
    fn test_connection_exactly_one_hour_is_not_short() {
        assert!(!connection_between(at(10, 0), at(11, 0)).unwrap().is_short);
    }

    #[test]
    fn test_no_connection_when_overlapping() {
        assert!(connection_between(at(10, 0), at(10, 0)).is_none());
        assert!(connection_between(at(10, 0), at(9, 0)).is_none());
    }

    #[test]
    fn test_itinerary_connection_needs_two_flights() {
        let a = flight("BA1", at(6, 0), at(9, 0));
        let b = flight("BA2", at(10, 30), at(14, 0));
        let c = itinerary_connection(&[a.clone(), b.clone()]).unwrap();
        assert_eq!((c.hours, c.minutes), (1, 30));
        assert!(itinerary_connection(&[a.clone()]).is_none());
        assert!(itinerary_connection(&[a, b.clone(), b]).is_none());
    }

    #[test]
    fn test_duration() {
        let f = flight("BA117", at(8, 20), at(16, 5));
        assert_eq!(flight_duration(&f), "7h 45m");
        let backwards = flight("BA117", at(8, 0), at(7, 0));
        assert_eq!(flight_duration(&backwards), "0h 0m");
    }

    #[test]
    fn test_progress() {
        let f = flight("BA117", at(8, 0), at(12, 0));
        assert_eq!(flight_progress(&f, at(7, 0)), 0.0);
        assert_eq!(flight_progress(&f, at(10, 0)), 50.0);
        assert_eq!(flight_progress(&f, at(13, 0)), 100.0);
        assert_eq!(flight_progress(&f, at(8, 0) + Duration::minutes(24)), 10.0);
    }
}
