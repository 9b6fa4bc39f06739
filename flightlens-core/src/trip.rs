//! Trip planning — origin/destination/date validation and route preview.

use chrono::NaiveDate;
use serde::Serialize;

use crate::gazetteer;
use crate::route::{self, AircraftSuggestion, DistanceBand, RouteQuery};
use crate::types::{FlightLensError, Result};

/// A trip request as entered: airport codes and `YYYY-MM-DD` dates.
#[derive(Debug, Clone, Default)]
pub struct TripQuery {
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub return_date: Option<String>,
    pub airline: Option<String>,
}

/// A validation failure for one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// What is known about a trip's route before any flight is picked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPreview {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub distance_mi: Option<u32>,
    pub band: Option<DistanceBand>,
    pub suggestion: Option<AircraftSuggestion>,
    pub forecast_location: Option<&'static str>,
}

fn is_airport_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

impl TripQuery {
    /// Trim and upper-case the airport codes, as typed input would be.
    pub fn normalized(mut self) -> Self {
        self.origin = self.origin.trim().to_ascii_uppercase();
        self.destination = self.destination.trim().to_ascii_uppercase();
        self
    }

    /// Check every field; an empty result means the query is valid.
    pub fn validate(&self, today: NaiveDate) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if !is_airport_code(&self.origin) {
            errors.push(FieldError {
                field: "origin",
                message: "Must be 3 uppercase letters (e.g., SYD)",
            });
        }
        if !is_airport_code(&self.destination) {
            errors.push(FieldError {
                field: "destination",
                message: "Must be 3 uppercase letters (e.g., LHR)",
            });
        }

        let departure = parse_date(&self.date);
        match departure {
            Some(d) if d >= today => {}
            _ => errors.push(FieldError {
                field: "date",
                message: "Must be a future date",
            }),
        }

        if let Some(ret) = self.return_date.as_deref().filter(|s| !s.trim().is_empty()) {
            let ok = matches!((parse_date(ret), departure), (Some(r), Some(d)) if r >= d);
            if !ok {
                errors.push(FieldError {
                    field: "return_date",
                    message: "Must be on or after departure date",
                });
            }
        }

        errors
    }

    /// Validate and build the route preview.
    pub fn plan(&self, today: NaiveDate) -> Result<TripPreview> {
        let errors = self.validate(today);
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(FlightLensError::InvalidInput(msg));
        }

        let date = parse_date(&self.date)
            .ok_or_else(|| FlightLensError::InvalidInput("date: Must be a future date".into()))?;
        let return_date = self.return_date.as_deref().and_then(parse_date);

        let miles = route::estimate_distance(&self.origin, &self.destination);
        let suggestion = route::infer_aircraft_from_route(&RouteQuery {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            airline: self.airline.clone().unwrap_or_default(),
            distance_mi: None,
        });

        Ok(TripPreview {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            date,
            return_date,
            distance_mi: (miles > 0).then_some(miles),
            band: DistanceBand::for_distance(miles),
            suggestion,
            forecast_location: gazetteer::forecast_location(&self.destination),
        })
    }
}
