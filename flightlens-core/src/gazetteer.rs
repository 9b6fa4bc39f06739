//! Airport code → forecast location string.
//!
//! The weather feed is queried by city name, so destination airports are
//! mapped to the city the forecast service knows them by.

const AIRPORT_CITIES: &[(&str, &str)] = &[
    ("JFK", "New York"),
    ("LAX", "Los Angeles"),
    ("LHR", "London"),
    ("CDG", "Paris"),
    ("DXB", "Dubai"),
    ("SIN", "Singapore"),
    ("HND", "Tokyo"),
    ("SYD", "Sydney"),
    ("FRA", "Frankfurt"),
    ("AMS", "Amsterdam"),
    ("MAD", "Madrid"),
    ("BCN", "Barcelona"),
    ("FCO", "Rome"),
    ("MXP", "Milan"),
    ("ZRH", "Zurich"),
    ("VIE", "Vienna"),
    ("BKK", "Bangkok"),
    ("HKG", "Hong Kong"),
    ("ICN", "Seoul"),
    ("PVG", "Shanghai"),
    ("PEK", "Beijing"),
    ("DEL", "New Delhi"),
    ("BOM", "Mumbai"),
    ("MEL", "Melbourne"),
    ("BNE", "Brisbane"),
    ("AKL", "Auckland"),
    ("YYZ", "Toronto"),
    ("YVR", "Vancouver"),
    ("MEX", "Mexico City"),
    ("GRU", "Sao Paulo"),
    ("EZE", "Buenos Aires"),
    ("JNB", "Johannesburg"),
    ("CAI", "Cairo"),
    ("IST", "Istanbul"),
    ("ATH", "Athens"),
    ("ORD", "Chicago"),
    ("DFW", "Dallas"),
    ("DEN", "Denver"),
    ("SFO", "San Francisco"),
    ("SEA", "Seattle"),
    ("MIA", "Miami"),
    ("ATL", "Atlanta"),
    ("BOS", "Boston"),
    ("LAS", "Las Vegas"),
    ("PHX", "Phoenix"),
    ("IAH", "Houston"),
    ("MCO", "Orlando"),
];

/// Forecast location for a 3-letter airport code. Case-insensitive.
pub fn forecast_location(airport: &str) -> Option<&'static str> {
    let code = airport.trim().to_ascii_uppercase();
    AIRPORT_CITIES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, city)| *city)
}

/// All known airport codes, in table order.
pub fn known_airports() -> impl Iterator<Item = &'static str> {
    AIRPORT_CITIES.iter().map(|(code, _)| *code)
}
