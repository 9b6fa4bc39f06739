//! OpenSky Network live-position client.
//!
//! `/api/states/all` returns every tracked aircraft as positional arrays:
//! index 0 is the ICAO24 address, index 1 the (space-padded) callsign.

use serde::Deserialize;
use serde_json::Value;

use flightlens_core::live::{self, LiveState};
use flightlens_core::types::LiveMatch;

use super::{LivePositionSource, LookupError};

#[derive(Debug, Deserialize)]
struct StatesResponse {
    #[serde(default)]
    states: Option<Vec<Option<Vec<Value>>>>,
}

/// Live-position lookups against the OpenSky `states/all` snapshot.
pub struct OpenSkyClient {
    http: reqwest::Client,
    url: String,
}

impl OpenSkyClient {
    pub fn new(http: reqwest::Client, url: String) -> Self {
        Self { http, url }
    }
}

fn state_from_row(row: &[Value]) -> Option<LiveState> {
    let icao24 = row.first()?.as_str()?.trim();
    if icao24.is_empty() {
        return None;
    }
    Some(LiveState {
        icao24: icao24.to_string(),
        callsign: row.get(1).and_then(Value::as_str).map(str::to_string),
    })
}

/// Decode a `states/all` body into live states, skipping malformed rows.
fn parse_states(body: &[u8]) -> Result<Vec<LiveState>, LookupError> {
    let response: StatesResponse =
        serde_json::from_slice(body).map_err(|e| LookupError::Json(e.to_string()))?;
    Ok(response
        .states
        .unwrap_or_default()
        .iter()
        .flatten()
        .filter_map(|row| state_from_row(row))
        .collect())
}

#[async_trait::async_trait]
impl LivePositionSource for OpenSkyClient {
    async fn find_by_callsign(&self, callsign: &str) -> Result<LiveMatch, LookupError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Upstream(format!(
                "OpenSky API request failed with status {}",
                status.as_u16()
            )));
        }

        let body = response.bytes().await?;
        let states = parse_states(&body)?;
        if states.is_empty() {
            return Err(LookupError::NotFound(
                "No active flights found in OpenSky Network".into(),
            ));
        }

        let hit = live::match_callsign(&states, callsign);
        tracing::debug!(
            total_states = states.len(),
            callsign,
            found = hit.is_some(),
            "live snapshot fetched"
        );

        hit.ok_or_else(|| LookupError::NotFound("Flight not found in active flights".into()))
    }
}
