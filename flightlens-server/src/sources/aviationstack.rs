//! AviationStack flight-status client.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use flightlens_core::types::{FlightEndpoint, FlightSnapshot, PrimaryAircraft};

use super::{FlightStatusSource, LookupError};

pub const NO_FLIGHT_FOUND: &str =
    "No flight found with this flight number. Please verify and try again.";

#[derive(Debug, Deserialize)]
struct FlightsResponse {
    #[serde(default)]
    data: Vec<FlightRecord>,
}

#[derive(Debug, Deserialize)]
struct FlightRecord {
    #[serde(default)]
    flight_status: Option<String>,
    departure: EndpointRecord,
    arrival: EndpointRecord,
    #[serde(default)]
    airline: Option<NamedRecord>,
    #[serde(default)]
    flight: Option<FlightCodes>,
    #[serde(default)]
    aircraft: Option<AircraftRecord>,
}

#[derive(Debug, Deserialize)]
struct EndpointRecord {
    #[serde(default)]
    airport: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default)]
    iata: Option<String>,
    #[serde(default)]
    terminal: Option<String>,
    #[serde(default)]
    gate: Option<String>,
    #[serde(default)]
    scheduled: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NamedRecord {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlightCodes {
    #[serde(default)]
    iata: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AircraftRecord {
    #[serde(default)]
    registration: Option<String>,
    #[serde(default)]
    iata: Option<String>,
    #[serde(default)]
    icao: Option<String>,
}

/// Flight-status lookups against the AviationStack `flights` endpoint.
pub struct AviationStackClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl AviationStackClient {
    pub fn new(http: reqwest::Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_scheduled(raw: &str) -> Result<DateTime<Utc>, LookupError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| LookupError::Json(format!("bad scheduled time {raw:?}: {e}")))
}

fn endpoint(record: EndpointRecord, side: &str) -> Result<FlightEndpoint, LookupError> {
    let scheduled = non_empty(record.scheduled).ok_or_else(|| {
        LookupError::Upstream(format!("Flight data is missing the scheduled {side} time"))
    })?;
    Ok(FlightEndpoint {
        scheduled: parse_scheduled(&scheduled)?,
        airport: record.airport.unwrap_or_default(),
        iata: record.iata.unwrap_or_default(),
        timezone: record.timezone.unwrap_or_default(),
        terminal: non_empty(record.terminal),
        gate: non_empty(record.gate),
    })
}

/// Convert the first record of a response body into a snapshot.
fn parse_response(body: &[u8], requested: &str) -> Result<FlightSnapshot, LookupError> {
    let response: FlightsResponse =
        serde_json::from_slice(body).map_err(|e| LookupError::Json(e.to_string()))?;

    let record = response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::NotFound(NO_FLIGHT_FOUND.into()))?;

    let aircraft = record.aircraft.map(|a| PrimaryAircraft {
        registration: non_empty(a.registration),
        iata_type: non_empty(a.iata),
        icao_type: non_empty(a.icao),
    });

    Ok(FlightSnapshot {
        flight_number: non_empty(record.flight.and_then(|f| f.iata))
            .unwrap_or_else(|| requested.to_string()),
        airline: non_empty(record.airline.and_then(|a| a.name)).unwrap_or_default(),
        status: record.flight_status.unwrap_or_default(),
        departure: endpoint(record.departure, "departure")?,
        arrival: endpoint(record.arrival, "arrival")?,
        aircraft,
    })
}

#[async_trait::async_trait]
impl FlightStatusSource for AviationStackClient {
    async fn search_flight(&self, flight_number: &str) -> Result<FlightSnapshot, LookupError> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            LookupError::NotConfigured(
                "Flight API key not configured. Please set AVIATION_STACK_API_KEY in environment variables."
                    .into(),
            )
        })?;

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("access_key", key), ("flight_iata", flight_number.trim())])
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(LookupError::RateLimited);
        }
        if !status.is_success() {
            return Err(LookupError::Upstream(format!(
                "API request failed with status {}",
                status.as_u16()
            )));
        }

        let body = response.bytes().await?;
        let snapshot = parse_response(&body, flight_number)?;

        let aircraft = snapshot.aircraft.as_ref();
        tracing::debug!(
            flight = %snapshot.flight_number,
            has_aircraft = aircraft.is_some(),
            iata_type = aircraft.and_then(|a| a.iata_type.as_deref()).unwrap_or("-"),
            icao_type = aircraft.and_then(|a| a.icao_type.as_deref()).unwrap_or("-"),
            "flight status fetched"
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "pagination": {"limit": 100, "offset": 0, "count": 1, "total": 1},
        "data": [{
            "flight_date": "2026-10-16",
            "flight_status": "scheduled",
            "departure": {"airport": "John F Kennedy International", "timezone": "America/New_York",
                          "iata": "JFK", "icao": "KJFK", "terminal": "7", "gate": null,
                          "scheduled": "2026-10-16T18:30:00+00:00"},
            "arrival": {"airport": "Heathrow", "timezone": "Europe/London", "iata": "LHR",
                        "terminal": "", "gate": "B2", "scheduled": "2026-10-17T06:35:00+00:00"},
            "airline": {"name": "British Airways", "iata": "BA", "icao": "BAW"},
            "flight": {"number": "117", "iata": "BA117", "icao": "BAW117"},
            "aircraft": {"registration": "", "iata": "", "icao": "B77W", "icao24": "4007F4"},
            "live": null
        }]
    }"#;

    #[test]
    fn test_parse_first_record() {
        let snap = parse_response(SAMPLE.as_bytes(), "ba117").unwrap();
        assert_eq!(snap.flight_number, "BA117");
        assert_eq!(snap.airline, "British Airways");
        assert_eq!(snap.status, "scheduled");
        assert_eq!(snap.departure.iata, "JFK");
        assert_eq!(snap.departure.terminal.as_deref(), Some("7"));
        assert!(snap.departure.gate.is_none());
        assert!(snap.arrival.terminal.is_none());
        assert_eq!(snap.arrival.gate.as_deref(), Some("B2"));
        assert_eq!(snap.departure.scheduled.to_rfc3339(), "2026-10-16T18:30:00+00:00");
    }

    #[test]
    fn test_empty_aircraft_fields_become_none() {
        let snap = parse_response(SAMPLE.as_bytes(), "BA117").unwrap();
        let aircraft = snap.aircraft.unwrap();
        assert!(aircraft.registration.is_none());
        assert!(aircraft.iata_type.is_none());
        assert_eq!(aircraft.icao_type.as_deref(), Some("B77W"));
    }

    #[test]
    fn test_null_aircraft() {
        let body = SAMPLE.replace(
            r#""aircraft": {"registration": "", "iata": "", "icao": "B77W", "icao24": "4007F4"}"#,
            r#""aircraft": null"#,
        );
        let snap = parse_response(body.as_bytes(), "BA117").unwrap();
        assert!(snap.aircraft.is_none());
    }

    #[test]
    fn test_empty_data_is_not_found() {
        let err = parse_response(br#"{"data": []}"#, "XX1").unwrap_err();
        assert_eq!(err, LookupError::NotFound(NO_FLIGHT_FOUND.into()));
        let err = parse_response(br#"{"error": {"code": "usage_limit_reached"}}"#, "XX1").unwrap_err();
        assert_eq!(err, LookupError::NotFound(NO_FLIGHT_FOUND.into()));
    }

    #[test]
    fn test_null_scheduled_time() {
        let body = SAMPLE.replace(
            r#""scheduled": "2026-10-17T06:35:00+00:00""#,
            r#""scheduled": null"#,
        );
        let err = parse_response(body.as_bytes(), "BA117").unwrap_err();
        assert_eq!(
            err,
            LookupError::Upstream("Flight data is missing the scheduled arrival time".into())
        );
    }

    #[test]
    fn test_garbage_body() {
        assert!(matches!(
            parse_response(b"<html>", "BA117"),
            Err(LookupError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let client = AviationStackClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/v1/flights".into(),
            None,
        );
        assert!(matches!(
            client.search_flight("BA117").await,
            Err(LookupError::NotConfigured(_))
        ));
    }
}
