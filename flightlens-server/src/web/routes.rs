//! REST API route handlers.
//!
//! Validation failures are 400s with the user-facing message. Upstream
//! failures map to 404 / 429 / 502 with the error text in `{"error": …}`.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use flightlens_core::gazetteer;
use flightlens_core::itinerary;
use flightlens_core::trip::TripQuery;
use flightlens_core::types::FlightLensError;

use crate::sources::LookupError;
use crate::web::AppState;

// ---------------------------------------------------------------------------
// Query param types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct FlightsParams {
    numbers: Option<String>,
}

#[derive(Deserialize)]
pub struct WeatherParams {
    timezone: Option<String>,
}

#[derive(Deserialize)]
pub struct TripParams {
    origin: Option<String>,
    destination: Option<String>,
    date: Option<String>,
    return_date: Option<String>,
    airline: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn core_error(e: FlightLensError) -> Response {
    match e {
        FlightLensError::InvalidInput(msg) => error_response(StatusCode::BAD_REQUEST, msg),
        other => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

fn lookup_error(e: LookupError) -> Response {
    let status = match e {
        LookupError::NotFound(_) => StatusCode::NOT_FOUND,
        LookupError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::BAD_GATEWAY,
    };
    error_response(status, e.to_string())
}

// ---------------------------------------------------------------------------
// Flight endpoints
// ---------------------------------------------------------------------------

/// GET /api/flights?numbers=BA117,BA332 — one or more flights.
pub async fn api_flights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FlightsParams>,
) -> Response {
    let input = params.numbers.unwrap_or_default();
    match state.lookup.itinerary(&input, Utc::now()).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => core_error(e),
    }
}

/// GET /api/flights/:number — a single flight report.
pub async fn api_flight_detail(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> Response {
    let number = match itinerary::validate_flight_number(&number) {
        Ok(n) => n,
        Err(e) => return core_error(e),
    };
    match state.lookup.flight(&number, Utc::now()).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => lookup_error(e),
    }
}

// ---------------------------------------------------------------------------
// Weather / reference endpoints
// ---------------------------------------------------------------------------

/// GET /api/weather/:iata?timezone=Europe/London — destination forecast.
pub async fn api_weather(
    State(state): State<Arc<AppState>>,
    Path(iata): Path<String>,
    Query(params): Query<WeatherParams>,
) -> Response {
    let iata = iata.trim().to_ascii_uppercase();
    let timezone = params.timezone.unwrap_or_else(|| "UTC".into());
    match state.lookup.weather(&iata, &timezone).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => lookup_error(e),
    }
}

/// GET /api/aircraft/:iata/specs — display specs for an aircraft type.
pub async fn api_aircraft_specs(
    State(state): State<Arc<AppState>>,
    Path(iata): Path<String>,
) -> Response {
    match state.lookup.specs.get(&iata) {
        Some(specs) => Json(json!({
            "iata": iata.trim().to_ascii_uppercase(),
            "specs": specs,
        }))
        .into_response(),
        None => error_response(StatusCode::NOT_FOUND, format!("No specs for aircraft type {iata}")),
    }
}

/// GET /api/airports — airports with forecast coverage.
pub async fn api_airports() -> impl IntoResponse {
    let airports: Vec<_> = gazetteer::known_airports()
        .map(|code| {
            json!({
                "code": code,
                "city": gazetteer::forecast_location(code),
            })
        })
        .collect();
    Json(json!(airports))
}

// ---------------------------------------------------------------------------
// Trip planning
// ---------------------------------------------------------------------------

/// GET /api/trip?origin=JFK&destination=LHR&date=YYYY-MM-DD — route preview.
pub async fn api_trip(Query(params): Query<TripParams>) -> Response {
    let query = TripQuery {
        origin: params.origin.unwrap_or_default(),
        destination: params.destination.unwrap_or_default(),
        date: params.date.unwrap_or_default(),
        return_date: params.return_date,
        airline: params.airline,
    }
    .normalized();
    let today = Utc::now().date_naive();

    let errors = query.validate(today);
    if !errors.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response();
    }

    match query.plan(today) {
        Ok(preview) => Json(preview).into_response(),
        Err(e) => core_error(e),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
