//! flightlens-core: Pure aircraft identification and trip-planning library.
//!
//! No async, no network — just lookup tables and decision logic. The
//! `flightlens-server` crate drives it against the live flight, position and
//! weather services.

pub mod config;
pub mod gate;
pub mod gazetteer;
pub mod icao;
pub mod itinerary;
pub mod live;
pub mod resolver;
pub mod route;
pub mod specs;
pub mod trip;
pub mod types;
pub mod weather;

// Re-export commonly used types at crate root
pub use resolver::{resolve_offline, resolve_with, Pending, ResolveStep};
pub use route::{AircraftSuggestion, DistanceBand};
pub use specs::{AircraftSpecs, SpecTable};
pub use types::*;
