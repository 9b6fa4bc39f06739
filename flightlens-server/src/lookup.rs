//! Async lookup driver.
//!
//! Runs the core resolver against the live-position source with a timeout,
//! fans multi-flight requests out concurrently, and enriches each flight with
//! destination weather and aircraft specs. Sub-lookup failures never fail the
//! flight; they are logged and contribute nothing.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::Serialize;

use flightlens_core::gazetteer;
use flightlens_core::itinerary::{self, ConnectionTime};
use flightlens_core::resolver::{self, ResolveStep};
use flightlens_core::specs::{AircraftSpecs, SpecTable};
use flightlens_core::types::{AircraftIdentity, FlightEndpoint, FlightSnapshot, Result};
use flightlens_core::weather::WeatherReport;

use crate::sources::{FlightStatusSource, LivePositionSource, LookupError, WeatherSource};

/// Everything known about one flight.
#[derive(Debug, Clone, Serialize)]
pub struct FlightReport {
    pub flight: FlightSnapshot,
    pub aircraft: AircraftIdentity,
    pub specs: Option<AircraftSpecs>,
    pub duration: String,
    pub progress: f64,
    pub weather: Option<WeatherReport>,
}

/// Result for one flight of an itinerary.
#[derive(Debug, Clone, Serialize)]
pub struct FlightOutcome {
    pub flight_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<FlightReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Results for a comma-separated list of flights.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryReport {
    pub is_multi_flight: bool,
    pub flights: Vec<FlightOutcome>,
    pub connection: Option<ConnectionTime>,
}

/// Upstream sources plus the lookup settings.
pub struct Lookup {
    pub flights: Arc<dyn FlightStatusSource>,
    pub live: Arc<dyn LivePositionSource>,
    pub weather: Arc<dyn WeatherSource>,
    pub specs: SpecTable,
    pub live_timeout: Duration,
}

/// Resolve a snapshot, querying the live source only when the gate is open.
pub async fn resolve_aircraft(
    snapshot: &FlightSnapshot,
    live: &dyn LivePositionSource,
    now: DateTime<Utc>,
    live_timeout: Duration,
) -> AircraftIdentity {
    let pending = match resolver::start(snapshot, now) {
        ResolveStep::Done(identity) => return identity,
        ResolveStep::AwaitLive(pending) => pending,
    };

    let live_match = match pending.callsign() {
        None => {
            tracing::debug!(
                flight = %snapshot.flight_number,
                "outside live lookup window, skipping"
            );
            None
        }
        Some(callsign) => {
            match tokio::time::timeout(live_timeout, live.find_by_callsign(callsign)).await {
                Ok(Ok(m)) => Some(m),
                Ok(Err(e)) => {
                    tracing::warn!(callsign, error = %e, "live lookup failed");
                    None
                }
                Err(_) => {
                    tracing::warn!(
                        callsign,
                        timeout_ms = live_timeout.as_millis() as u64,
                        "live lookup timed out"
                    );
                    None
                }
            }
        }
    };

    pending.finish(live_match)
}

/// Forecast for an airport code, via the gazetteer.
pub async fn destination_weather(
    weather: &dyn WeatherSource,
    airport: &str,
    timezone: &str,
) -> std::result::Result<WeatherReport, LookupError> {
    let location = gazetteer::forecast_location(airport).ok_or_else(|| {
        LookupError::NotFound(format!(
            "Weather data not available for airport {airport}. Airport may not be in the mapping database."
        ))
    })?;
    weather.forecast(location, timezone).await
}

impl Lookup {
    /// Full report for one already-validated flight number.
    pub async fn flight(
        &self,
        flight_number: &str,
        now: DateTime<Utc>,
    ) -> std::result::Result<FlightReport, LookupError> {
        let snapshot = self.flights.search_flight(flight_number).await?;

        let (aircraft, weather) = tokio::join!(
            resolve_aircraft(&snapshot, self.live.as_ref(), now, self.live_timeout),
            self.enrich_weather(&snapshot.arrival),
        );

        tracing::info!(
            flight = %snapshot.flight_number,
            source = aircraft.source(),
            iata_type = aircraft.iata_type().unwrap_or("-"),
            "flight resolved"
        );

        let specs = aircraft
            .iata_type()
            .and_then(|code| self.specs.get(code))
            .cloned();

        Ok(FlightReport {
            duration: itinerary::flight_duration(&snapshot),
            progress: itinerary::flight_progress(&snapshot, now),
            flight: snapshot,
            aircraft,
            specs,
            weather,
        })
    }

    /// Look up every flight in comma-separated input concurrently.
    pub async fn itinerary(&self, input: &str, now: DateTime<Utc>) -> Result<ItineraryReport> {
        let numbers = itinerary::parse_flight_numbers(input)?;

        let results = join_all(numbers.iter().map(|n| self.flight(n, now))).await;

        let flights: Vec<FlightOutcome> = numbers
            .into_iter()
            .zip(results)
            .map(|(flight_number, result)| match result {
                Ok(report) => FlightOutcome {
                    flight_number,
                    report: Some(report),
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(flight = %flight_number, error = %e, "flight lookup failed");
                    FlightOutcome {
                        flight_number,
                        report: None,
                        error: Some(e.to_string()),
                    }
                }
            })
            .collect();

        // Only a two-leg itinerary where both legs resolved has a layover.
        let connection = match flights.as_slice() {
            [first, second] => match (&first.report, &second.report) {
                (Some(a), Some(b)) => {
                    itinerary::itinerary_connection(&[a.flight.clone(), b.flight.clone()])
                }
                _ => None,
            },
            _ => None,
        };

        Ok(ItineraryReport {
            is_multi_flight: flights.len() > 1,
            connection,
            flights,
        })
    }

    /// Forecast for an airport; errors are returned to the caller.
    pub async fn weather(
        &self,
        airport: &str,
        timezone: &str,
    ) -> std::result::Result<WeatherReport, LookupError> {
        destination_weather(self.weather.as_ref(), airport, timezone).await
    }

    async fn enrich_weather(&self, arrival: &FlightEndpoint) -> Option<WeatherReport> {
        match self.weather(&arrival.iata, &arrival.timezone).await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!(airport = %arrival.iata, error = %e, "weather enrichment skipped");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory sources for tests
// ---------------------------------------------------------------------------
