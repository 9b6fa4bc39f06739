//! ICAO aircraft type designator → IATA aircraft type code.
//!
//! Flight-status feeds often carry only the ICAO designator (e.g. `B77W`),
//! while the specs table and route inference are keyed by IATA type. Most
//! commercial designators map to themselves; a few (777-300ER) do not.

/// Known commercial aircraft types: (ICAO designator, IATA code).
const TYPE_MAPPINGS: &[(&str, &str)] = &[
    // Boeing
    ("B738", "B738"), // 737-800
    ("B739", "B739"), // 737-900
    ("B38M", "B38M"), // 737 MAX 8
    ("B39M", "B39M"), // 737 MAX 9
    ("B763", "B763"), // 767-300
    ("B772", "B772"), // 777-200
    ("B77W", "B773"), // 777-300ER
    ("B773", "B773"), // 777-300ER
    ("B788", "B788"), // 787-8
    ("B789", "B789"), // 787-9
    ("B78X", "B78X"), // 787-10
    ("B744", "B744"), // 747-400
    ("B748", "B748"), // 747-8
    // Airbus
    ("A319", "A319"),
    ("A320", "A320"),
    ("A321", "A321"),
    ("A20N", "A20N"), // A320neo
    ("A21N", "A21N"), // A321neo
    ("A332", "A332"), // A330-200
    ("A333", "A333"), // A330-300
    ("A339", "A339"), // A330-900neo
    ("A359", "A359"), // A350-900
    ("A35K", "A35K"), // A350-1000
    ("A388", "A388"), // A380-800
    // Embraer
    ("E190", "E190"),
    ("E195", "E195"),
    // Dash 8 Q400
    ("DH4", "DH4"),
    // A220 (ex-CSeries)
    ("BCS1", "BCS1"),
    ("BCS3", "BCS3"),
];

/// Translate an ICAO type designator to its IATA type code.
///
/// Case-insensitive; surrounding whitespace is ignored. Unknown or empty
/// designators yield `None`.
pub fn icao_to_iata(icao: &str) -> Option<&'static str> {
    let code = icao.trim().to_ascii_uppercase();
    if code.is_empty() {
        return None;
    }
    TYPE_MAPPINGS
        .iter()
        .find(|(icao, _)| *icao == code)
        .map(|(_, iata)| *iata)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
