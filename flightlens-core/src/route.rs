//! Route-based aircraft inference — estimate a plausible aircraft type from
//! route distance and airline fleet composition.
//!
//! Output is advisory: every suggestion is an estimate and is reported to
//! callers as such.

use serde::Serialize;

use crate::types::Confidence;

// ---------------------------------------------------------------------------
// Route distances
// ---------------------------------------------------------------------------

/// Known route distances in statute miles. Pairs are unordered.
const ROUTE_DISTANCES: &[(&str, &str, u32)] = &[
    ("JFK", "LHR", 3459),
    ("JFK", "LAX", 2475),
    ("LAX", "SYD", 7488),
    ("LHR", "SIN", 6768),
    ("SIN", "SYD", 3907),
    ("FRA", "SIN", 6317),
    ("DXB", "LHR", 3420),
    ("JFK", "DXB", 6840),
];

/// Distance between two airports in miles, checking both orderings.
///
/// Returns 0 when the pair is unknown.
pub fn estimate_distance(origin: &str, destination: &str) -> u32 {
    let origin = origin.trim().to_ascii_uppercase();
    let destination = destination.trim().to_ascii_uppercase();
    ROUTE_DISTANCES
        .iter()
        .find(|(a, b, _)| {
            (*a == origin && *b == destination) || (*a == destination && *b == origin)
        })
        .map(|(_, _, miles)| *miles)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Distance bands
// ---------------------------------------------------------------------------

/// Distance bucket used to pick typical equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceBand {
    /// `[0, 1000)` miles
    Short,
    /// `[1000, 3000)` miles
    Medium,
    /// `[3000, 6000)` miles
    Long,
    /// `[6000, ∞)` miles
    Ultra,
}

/// One entry of a band's priority list: (IATA type, model, confidence).
pub type BandCandidate = (&'static str, &'static str, Confidence);

const SHORT_HAUL: &[BandCandidate] = &[
    ("B738", "Boeing 737-800", Confidence::High),
    ("A320", "Airbus A320", Confidence::High),
    ("A321", "Airbus A321", Confidence::Medium),
];

const MEDIUM_HAUL: &[BandCandidate] = &[
    ("B738", "Boeing 737-800", Confidence::Medium),
    ("B789", "Boeing 787-9", Confidence::Medium),
    ("A321", "Airbus A321", Confidence::Medium),
    ("A332", "Airbus A330-200", Confidence::Low),
];

const LONG_HAUL: &[BandCandidate] = &[
    ("B789", "Boeing 787-9", Confidence::High),
    ("B773", "Boeing 777-300ER", Confidence::High),
    ("A359", "Airbus A350-900", Confidence::High),
    ("A332", "Airbus A330-200", Confidence::Medium),
];

const ULTRA_LONG_HAUL: &[BandCandidate] = &[
    ("B789", "Boeing 787-9", Confidence::High),
    ("B773", "Boeing 777-300ER", Confidence::High),
    ("A359", "Airbus A350-900", Confidence::High),
    ("A388", "Airbus A380-800", Confidence::Medium),
];

impl DistanceBand {
    /// Band for a known distance. `None` for 0 (unknown).
    pub fn for_distance(miles: u32) -> Option<DistanceBand> {
        match miles {
            0 => None,
            1..=999 => Some(DistanceBand::Short),
            1000..=2999 => Some(DistanceBand::Medium),
            3000..=5999 => Some(DistanceBand::Long),
            _ => Some(DistanceBand::Ultra),
        }
    }

    /// Priority-ordered candidates for this band.
    pub fn candidates(self) -> &'static [BandCandidate] {
        match self {
            DistanceBand::Short => SHORT_HAUL,
            DistanceBand::Medium => MEDIUM_HAUL,
            DistanceBand::Long => LONG_HAUL,
            DistanceBand::Ultra => ULTRA_LONG_HAUL,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            DistanceBand::Short => "Short-haul route",
            DistanceBand::Medium => "Medium-haul route",
            DistanceBand::Long => "Long-haul route",
            DistanceBand::Ultra => "Ultra long-haul route",
        }
    }
}

// ---------------------------------------------------------------------------
// Airline fleets
// ---------------------------------------------------------------------------

/// Typical equipment per airline, in the carrier's own order of prevalence.
const AIRLINE_FLEETS: &[(&str, &[&str])] = &[
    ("American Airlines", &["B738", "B772", "B773", "B788", "B789"]),
    ("United Airlines", &["B738", "B772", "B773", "B788", "B789", "A320"]),
    ("Delta Air Lines", &["B738", "B763", "A320", "A321", "A332", "A333"]),
    ("British Airways", &["A320", "A321", "B772", "B773", "B788", "B789", "A388"]),
    ("Singapore Airlines", &["A350", "A359", "A35K", "B773", "B77W", "A388"]),
    ("Emirates", &["A380", "A388", "B773", "B77W", "A350", "A359"]),
    ("Lufthansa", &["A320", "A321", "A332", "A333", "A350", "A359", "B748"]),
    ("Qantas", &["B738", "B789", "A332", "A333", "A388"]),
    ("Air France", &["A320", "A321", "A332", "A333", "A350", "A359", "B777"]),
    ("Japan Airlines", &["B738", "B773", "B77W", "B788", "B789"]),
];

/// Look up an airline's typical fleet by exact name.
pub fn airline_fleet(airline: &str) -> Option<&'static [&'static str]> {
    AIRLINE_FLEETS
        .iter()
        .find(|(name, _)| *name == airline.trim())
        .map(|(_, fleet)| *fleet)
}

// ---------------------------------------------------------------------------
// Inference
// ---------------------------------------------------------------------------

/// A suggested aircraft type for a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AircraftSuggestion {
    pub iata: String,
    pub model: String,
    pub confidence: Confidence,
    pub reason: String,
}

/// Inputs for route inference. `distance_mi` overrides the built-in table.
#[derive(Debug, Clone, Default)]
pub struct RouteQuery {
    pub origin: String,
    pub destination: String,
    pub airline: String,
    pub distance_mi: Option<u32>,
}

/// Infer a likely aircraft type for a route flown by an airline.
pub fn infer(origin: &str, destination: &str, airline: &str) -> Option<AircraftSuggestion> {
    infer_aircraft_from_route(&RouteQuery {
        origin: origin.into(),
        destination: destination.into(),
        airline: airline.into(),
        distance_mi: None,
    })
}

/// Infer a likely aircraft type, honouring a caller-supplied distance.
pub fn infer_aircraft_from_route(query: &RouteQuery) -> Option<AircraftSuggestion> {
    let distance = query
        .distance_mi
        .filter(|d| *d > 0)
        .unwrap_or_else(|| estimate_distance(&query.origin, &query.destination));
    select_candidate(distance, airline_fleet(&query.airline), &query.airline)
}

/// Pick a suggestion for a distance and an (optional) fleet.
///
/// Band order is the primary key; fleet membership only filters it. When no
/// band candidate is in the fleet, the fleet's first type is returned at low
/// confidence. With no fleet, the band's first candidate wins.
pub fn select_candidate(
    distance_mi: u32,
    fleet: Option<&[&str]>,
    airline: &str,
) -> Option<AircraftSuggestion> {
    let band = DistanceBand::for_distance(distance_mi);
    let fleet = fleet.filter(|f| !f.is_empty());

    if let (Some(band), Some(fleet)) = (band, fleet) {
        if let Some(c) = band
            .candidates()
            .iter()
            .find(|(iata, _, _)| fleet.contains(iata))
        {
            return Some(from_band(c, band));
        }
    }

    if let Some(fleet) = fleet {
        let first = fleet[0];
        return Some(AircraftSuggestion {
            iata: first.to_string(),
            model: model_from_code(first),
            confidence: Confidence::Low,
            reason: format!("Based on {} typical fleet", airline.trim()),
        });
    }

    band.and_then(|b| b.candidates().first().map(|c| from_band(c, b)))
}

fn from_band(
    &(iata, model, confidence): &BandCandidate,
    band: DistanceBand,
) -> AircraftSuggestion {
    AircraftSuggestion {
        iata: iata.to_string(),
        model: model.to_string(),
        confidence,
        reason: band.reason().to_string(),
    }
}

/// Generic model name from a type code: `B788` → `Boeing 788`.
pub fn model_from_code(code: &str) -> String {
    if let Some(rest) = code.strip_prefix('B') {
        format!("Boeing {rest}")
    } else if let Some(rest) = code.strip_prefix('A') {
        format!("Airbus {rest}")
    } else {
        code.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
