//! Web server — axum JSON API for flight, weather and trip lookups.
//!
//! Shared state holds the upstream sources behind trait objects and the
//! aircraft specs table. Handlers never block; every upstream call is async.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::lookup::Lookup;

pub mod routes;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

pub struct AppState {
    pub lookup: Lookup,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/flights", axum::routing::get(routes::api_flights))
        .route(
            "/api/flights/:number",
            axum::routing::get(routes::api_flight_detail),
        )
        .route(
            "/api/weather/:iata",
            axum::routing::get(routes::api_weather),
        )
        .route(
            "/api/aircraft/:iata/specs",
            axum::routing::get(routes::api_aircraft_specs),
        )
        .route("/api/airports", axum::routing::get(routes::api_airports))
        .route("/api/trip", axum::routing::get(routes::api_trip))
        .with_state(state)
        .layer(cors)
}

/// Start the web server.
pub async fn serve(lookup: Lookup, host: &str, port: u16) -> std::io::Result<()> {
    let state = Arc::new(AppState { lookup });

    let app = build_router(state);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "FlightLens API listening");
    axum::serve(listener, app).await
}
