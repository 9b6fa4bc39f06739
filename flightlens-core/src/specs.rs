//! Aircraft specification table — display specs keyed by IATA type code.
//!
//! A built-in table covers the common commercial types. A JSON file in the
//! same shape as the web client's `aircraft_data.json` can replace it:
//!
//! ```json
//! { "B789": { "model": "Boeing 787-9", "range": 8786, "cruiseSpeed": 561,
//!             "seatMapUrl": "https://…" } }
//! ```
//!
//! Missing entries are normal; specs are purely additive.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{FlightLensError, Result};

/// Display specs for one aircraft type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftSpecs {
    pub model: String,
    #[serde(alias = "range")]
    pub range_mi: u32,
    #[serde(alias = "cruiseSpeed")]
    pub cruise_mph: u32,
    #[serde(default, alias = "seatMapUrl")]
    pub seat_map_url: Option<String>,
}

/// Built-in specs: (IATA type, model, range in miles, cruise speed in mph).
const BUILTIN_SPECS: &[(&str, &str, u32, u32)] = &[
    ("B738", "Boeing 737-800", 3582, 521),
    ("B739", "Boeing 737-900", 3235, 521),
    ("B38M", "Boeing 737 MAX 8", 4083, 521),
    ("B39M", "Boeing 737 MAX 9", 4083, 521),
    ("B763", "Boeing 767-300ER", 6385, 530),
    ("B772", "Boeing 777-200ER", 8190, 554),
    ("B773", "Boeing 777-300ER", 8482, 554),
    ("B788", "Boeing 787-8", 8406, 561),
    ("B789", "Boeing 787-9", 8786, 561),
    ("B78X", "Boeing 787-10", 7400, 561),
    ("B744", "Boeing 747-400", 8355, 567),
    ("B748", "Boeing 747-8", 8895, 570),
    ("A319", "Airbus A319", 4305, 514),
    ("A320", "Airbus A320", 3800, 514),
    ("A321", "Airbus A321", 3680, 514),
    ("A20N", "Airbus A320neo", 3913, 514),
    ("A21N", "Airbus A321neo", 4603, 514),
    ("A332", "Airbus A330-200", 8343, 541),
    ("A333", "Airbus A330-300", 7307, 541),
    ("A339", "Airbus A330-900neo", 8286, 541),
    ("A359", "Airbus A350-900", 9321, 561),
    ("A35K", "Airbus A350-1000", 10012, 561),
    ("A388", "Airbus A380-800", 9206, 561),
    ("E190", "Embraer E190", 2819, 515),
    ("E195", "Embraer E195", 2647, 515),
    ("DH4", "De Havilland Dash 8 Q400", 1266, 414),
    ("BCS1", "Airbus A220-100", 3970, 541),
    ("BCS3", "Airbus A220-300", 3855, 541),
];

/// Specs lookup by IATA type code.
#[derive(Debug, Clone, Default)]
pub struct SpecTable {
    entries: HashMap<String, AircraftSpecs>,
}

impl SpecTable {
    /// The built-in table.
    pub fn builtin() -> Self {
        let entries = BUILTIN_SPECS
            .iter()
            .map(|(code, model, range_mi, cruise_mph)| {
                (
                    code.to_string(),
                    AircraftSpecs {
                        model: model.to_string(),
                        range_mi: *range_mi,
                        cruise_mph: *cruise_mph,
                        seat_map_url: None,
                    },
                )
            })
            .collect();
        SpecTable { entries }
    }

    /// Parse a JSON object keyed by IATA type code.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: HashMap<String, AircraftSpecs> =
            serde_json::from_str(text).map_err(|e| FlightLensError::Specs(e.to_string()))?;
        let entries = raw
            .into_iter()
            .map(|(code, specs)| (code.trim().to_ascii_uppercase(), specs))
            .collect();
        Ok(SpecTable { entries })
    }

    /// Load a JSON specs file. A file with no entries is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let table = Self::from_json(&text)?;
        if table.is_empty() {
            return Err(FlightLensError::Specs(format!(
                "no aircraft entries in {}",
                path.display()
            )));
        }
        Ok(table)
    }

    /// Load from `path` if given, falling back to the built-in table.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::builtin()),
        }
    }

    pub fn get(&self, iata: &str) -> Option<&AircraftSpecs> {
        self.entries.get(&iata.trim().to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
