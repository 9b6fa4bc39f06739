//! Shared types, error enum, and the resolver's input/output records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// All errors produced by flightlens-core.
#[derive(Debug, Error)]
pub enum FlightLensError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("aircraft specs error: {0}")]
    Specs(String),
}

pub type Result<T> = std::result::Result<T, FlightLensError>;

/// Registration shown when the primary source has none.
pub const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Flight snapshot (resolver input)
// ---------------------------------------------------------------------------

/// One end of a flight: departure or arrival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightEndpoint {
    pub airport: String,
    pub iata: String,
    pub scheduled: DateTime<Utc>,
    pub timezone: String,
    pub terminal: Option<String>,
    pub gate: Option<String>,
}

/// Aircraft fields as reported by the flight-status source. Any of them may be
/// missing, and empty strings are normalized to `None` by the source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimaryAircraft {
    pub registration: Option<String>,
    pub iata_type: Option<String>,
    pub icao_type: Option<String>,
}

/// A flight-status result, read-only to the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSnapshot {
    pub flight_number: String,
    pub airline: String,
    pub status: String,
    pub departure: FlightEndpoint,
    pub arrival: FlightEndpoint,
    pub aircraft: Option<PrimaryAircraft>,
}

impl FlightSnapshot {
    fn primary_field(&self, pick: impl Fn(&PrimaryAircraft) -> Option<&String>) -> Option<&str> {
        self.aircraft
            .as_ref()
            .and_then(pick)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Primary IATA type, if present and non-empty.
    pub fn primary_iata(&self) -> Option<&str> {
        self.primary_field(|a| a.iata_type.as_ref())
    }

    /// Primary ICAO type, if present and non-empty.
    pub fn primary_icao(&self) -> Option<&str> {
        self.primary_field(|a| a.icao_type.as_ref())
    }

    /// Primary registration, if present and not the "N/A" placeholder.
    pub fn primary_registration(&self) -> Option<&str> {
        self.primary_field(|a| a.registration.as_ref())
            .filter(|r| *r != NOT_AVAILABLE)
    }
}

// ---------------------------------------------------------------------------
// Live position match
// ---------------------------------------------------------------------------

/// A live-tracking hit for a callsign. `registration` is the transponder's
/// ICAO24 address, the only airframe identifier the live feed exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveMatch {
    pub registration: String,
    pub callsign: String,
}

// ---------------------------------------------------------------------------
// Aircraft identity (resolver output)
// ---------------------------------------------------------------------------

/// Confidence grade of a route-inferred aircraft type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

/// Best-effort aircraft identity for one flight. Exactly one variant is
/// produced per resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AircraftIdentity {
    /// Type reported directly by the flight-status source.
    Primary {
        iata_type: String,
        icao_type: Option<String>,
        registration: String,
    },
    /// Type translated from the source's ICAO designator.
    IcaoMapped {
        iata_type: String,
        icao_type: String,
        registration: Option<String>,
    },
    /// Airframe seen on the live feed; no type information.
    LiveTracked {
        registration: String,
        callsign: String,
    },
    /// Type estimated from route distance and airline fleet.
    RouteInferred {
        iata_type: String,
        model: String,
        registration: Option<String>,
        confidence: Confidence,
        reason: String,
    },
    Unavailable,
}

impl AircraftIdentity {
    /// Short source tag used in JSON and tables.
    pub fn source(&self) -> &'static str {
        match self {
            AircraftIdentity::Primary { .. } => "primary",
            AircraftIdentity::IcaoMapped { .. } => "icao_mapped",
            AircraftIdentity::LiveTracked { .. } => "live_tracked",
            AircraftIdentity::RouteInferred { .. } => "route_inferred",
            AircraftIdentity::Unavailable => "unavailable",
        }
    }

    /// True only for route-inferred identities.
    pub fn is_estimated(&self) -> bool {
        matches!(self, AircraftIdentity::RouteInferred { .. })
    }

    pub fn iata_type(&self) -> Option<&str> {
        match self {
            AircraftIdentity::Primary { iata_type, .. }
            | AircraftIdentity::IcaoMapped { iata_type, .. }
            | AircraftIdentity::RouteInferred { iata_type, .. } => Some(iata_type),
            AircraftIdentity::LiveTracked { .. } | AircraftIdentity::Unavailable => None,
        }
    }

    pub fn icao_type(&self) -> Option<&str> {
        match self {
            AircraftIdentity::Primary { icao_type, .. } => icao_type.as_deref(),
            AircraftIdentity::IcaoMapped { icao_type, .. } => Some(icao_type),
            _ => None,
        }
    }

    pub fn registration(&self) -> Option<&str> {
        match self {
            AircraftIdentity::Primary { registration, .. }
            | AircraftIdentity::LiveTracked { registration, .. } => Some(registration),
            AircraftIdentity::IcaoMapped { registration, .. }
            | AircraftIdentity::RouteInferred { registration, .. } => registration.as_deref(),
            AircraftIdentity::Unavailable => None,
        }
    }

    pub fn confidence(&self) -> Option<Confidence> {
        match self {
            AircraftIdentity::RouteInferred { confidence, .. } => Some(*confidence),
            _ => None,
        }
    }
}

/// Flat JSON shape: `source` tag, the variant's own fields, and `estimated`.
impl Serialize for AircraftIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("source", self.source())?;
        match self {
            AircraftIdentity::Primary {
                iata_type,
                icao_type,
                registration,
            } => {
                map.serialize_entry("iata_type", iata_type)?;
                map.serialize_entry("icao_type", icao_type)?;
                map.serialize_entry("registration", registration)?;
            }
            AircraftIdentity::IcaoMapped {
                iata_type,
                icao_type,
                registration,
            } => {
                map.serialize_entry("iata_type", iata_type)?;
                map.serialize_entry("icao_type", icao_type)?;
                map.serialize_entry("registration", registration)?;
            }
            AircraftIdentity::LiveTracked {
                registration,
                callsign,
            } => {
                map.serialize_entry("registration", registration)?;
                map.serialize_entry("callsign", callsign)?;
            }
            AircraftIdentity::RouteInferred {
                iata_type,
                model,
                registration,
                confidence,
                reason,
            } => {
                map.serialize_entry("iata_type", iata_type)?;
                map.serialize_entry("model", model)?;
                map.serialize_entry("registration", registration)?;
                map.serialize_entry("confidence", confidence)?;
                map.serialize_entry("reason", reason)?;
            }
            AircraftIdentity::Unavailable => {}
        }
        map.serialize_entry("estimated", &self.is_estimated())?;
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn endpoint(iata: &str) -> FlightEndpoint {
        FlightEndpoint {
            airport: format!("{iata} International"),
            iata: iata.into(),
            scheduled: Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap(),
            timezone: "UTC".into(),
            terminal: None,
            gate: None,
        }
    }

    fn snapshot(aircraft: Option<PrimaryAircraft>) -> FlightSnapshot {
        FlightSnapshot {
            flight_number: "BA117".into(),
            airline: "British Airways".into(),
            status: "scheduled".into(),
            departure: endpoint("LHR"),
            arrival: endpoint("JFK"),
            aircraft,
        }
    }

    #[test]
    fn test_primary_fields_ignore_blank_values() {
        let snap = snapshot(Some(PrimaryAircraft {
            registration: Some("N/A".into()),
            iata_type: Some("  ".into()),
            icao_type: Some("B77W".into()),
        }));
        assert_eq!(snap.primary_iata(), None);
        assert_eq!(snap.primary_icao(), Some("B77W"));
        assert_eq!(snap.primary_registration(), None);
    }

    #[test]
    fn test_primary_fields_without_aircraft() {
        let snap = snapshot(None);
        assert!(snap.primary_iata().is_none());
        assert!(snap.primary_icao().is_none());
        assert!(snap.primary_registration().is_none());
    }

    #[test]
    fn test_estimated_only_for_route_inferred() {
        let inferred = AircraftIdentity::RouteInferred {
            iata_type: "B789".into(),
            model: "Boeing 787-9".into(),
            registration: None,
            confidence: Confidence::High,
            reason: "Long-haul route".into(),
        };
        assert!(inferred.is_estimated());
        assert_eq!(inferred.confidence(), Some(Confidence::High));

        let live = AircraftIdentity::LiveTracked {
            registration: "4ca1fa".into(),
            callsign: "BA117".into(),
        };
        assert!(!live.is_estimated());
        assert!(live.confidence().is_none());
        assert!(live.iata_type().is_none());
        assert!(!AircraftIdentity::Unavailable.is_estimated());
    }

    #[test]
    fn test_identity_json_shape() {
        let id = AircraftIdentity::IcaoMapped {
            iata_type: "B773".into(),
            icao_type: "B77W".into(),
            registration: Some("G-STBA".into()),
        };
        let json = serde_json::to_value(&id).unwrap();
        assert_eq!(json["source"], "icao_mapped");
        assert_eq!(json["iata_type"], "B773");
        assert_eq!(json["icao_type"], "B77W");
        assert_eq!(json["estimated"], false);
        assert!(json.get("confidence").is_none());

        let json = serde_json::to_value(AircraftIdentity::Unavailable).unwrap();
        assert_eq!(json["source"], "unavailable");
        assert_eq!(json["estimated"], false);
    }

    #[test]
    fn test_route_inferred_json_carries_confidence() {
        let id = AircraftIdentity::RouteInferred {
            iata_type: "A320".into(),
            model: "Airbus A320".into(),
            registration: None,
            confidence: Confidence::Medium,
            reason: "Short-haul route".into(),
        };
        let json = serde_json::to_value(&id).unwrap();
        assert_eq!(json["confidence"], "medium");
        assert_eq!(json["estimated"], true);
        assert!(json["registration"].is_null());
    }
}
