//! Destination weather — daily forecast selection from a 3-hour feed.
//!
//! The forecast feed returns 40 entries at 3-hour steps. One entry per UTC
//! calendar day is kept: the first whose hour falls in 11:00–13:00 UTC.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use serde::Serialize;

/// Maximum number of days in a report.
pub const MAX_FORECAST_DAYS: usize = 5;

/// One 3-hour step of the upstream feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    /// Unix seconds, UTC.
    pub dt: i64,
    pub temp: f64,
    pub description: String,
    pub icon: String,
}

/// A selected midday forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecast {
    /// Display label, e.g. `Fri, Oct 16`.
    pub date: String,
    pub temp: i64,
    pub description: String,
    pub icon: String,
}

/// Weather at a destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub location: String,
    /// Current local time at the destination, `HH:MM`.
    pub local_time: String,
    pub timezone: String,
    pub forecast: Vec<DailyForecast>,
}

/// Pick one midday entry per calendar day, oldest first, at most five.
pub fn select_daily(entries: &[ForecastEntry]) -> Vec<DailyForecast> {
    let mut ordered: Vec<(&ForecastEntry, DateTime<Utc>)> = entries
        .iter()
        .filter_map(|e| DateTime::<Utc>::from_timestamp(e.dt, 0).map(|t| (e, t)))
        .collect();
    ordered.sort_by_key(|(_, t)| *t);

    let mut seen: HashSet<NaiveDate> = HashSet::new();
    let mut days = Vec::with_capacity(MAX_FORECAST_DAYS);

    for (entry, time) in ordered {
        if !(11..=13).contains(&time.hour()) || !seen.insert(time.date_naive()) {
            continue;
        }
        days.push(DailyForecast {
            date: time.format("%a, %b %-d").to_string(),
            temp: round_half_up(entry.temp),
            description: entry.description.clone(),
            icon: entry.icon.clone(),
        });
        if days.len() >= MAX_FORECAST_DAYS {
            break;
        }
    }

    days
}

/// Local wall-clock time for a UTC offset in seconds, `HH:MM`.
pub fn local_time(now: DateTime<Utc>, utc_offset_secs: i64) -> String {
    (now + Duration::seconds(utc_offset_secs))
        .format("%H:%M")
        .to_string()
}

fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}
