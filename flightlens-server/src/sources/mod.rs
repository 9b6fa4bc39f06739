//! External collaborators — flight status, live positions, weather.
//!
//! Each is a trait so handlers and the lookup driver can hold them as
//! `Arc<dyn …>` and tests can swap in in-memory fakes.

use std::time::Duration;

use thiserror::Error;

use flightlens_core::types::{FlightSnapshot, LiveMatch};
use flightlens_core::weather::WeatherReport;

pub mod aviationstack;
pub mod opensky;
pub mod openweather;

pub use aviationstack::AviationStackClient;
pub use opensky::OpenSkyClient;
pub use openweather::OpenWeatherClient;

/// Per-request HTTP timeout for all upstream clients.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Upstream lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("{0}")]
    NotFound(String),
    #[error("API rate limit reached. Please try again later.")]
    RateLimited,
    #[error("{0}")]
    Upstream(String),
    #[error("Connection error: {0}")]
    Http(String),
    #[error("unexpected response: {0}")]
    Json(String),
    #[error("{0}")]
    NotConfigured(String),
    #[error("lookup timed out")]
    Timeout,
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LookupError::Timeout
        } else {
            LookupError::Http(e.to_string())
        }
    }
}

/// Flight-status provider.
#[async_trait::async_trait]
pub trait FlightStatusSource: Send + Sync {
    /// Look up one flight by IATA flight number.
    async fn search_flight(&self, flight_number: &str) -> Result<FlightSnapshot, LookupError>;
}

/// Live-position provider.
#[async_trait::async_trait]
pub trait LivePositionSource: Send + Sync {
    /// Find an airborne aircraft broadcasting a callsign for this flight.
    async fn find_by_callsign(&self, callsign: &str) -> Result<LiveMatch, LookupError>;
}

/// Forecast provider.
#[async_trait::async_trait]
pub trait WeatherSource: Send + Sync {
    /// Daily forecast for a location name. `timezone` is echoed into the report.
    async fn forecast(&self, location: &str, timezone: &str) -> Result<WeatherReport, LookupError>;
}

/// Build the shared reqwest client used by the upstream sources.
pub fn http_client() -> Result<reqwest::Client, LookupError> {
    reqwest::Client::builder()
        .timeout(DEFAULT_HTTP_TIMEOUT)
        .build()
        .map_err(|e| LookupError::Http(e.to_string()))
}
