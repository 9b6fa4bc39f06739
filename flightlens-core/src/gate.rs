//! Time-window gate for the live-position lookup.
//!
//! The live feed is a rate-limited global snapshot, so it is only worth
//! querying while a flight could plausibly be on the feed: departing within
//! the next 12 hours or departed within the last 24.

use chrono::{DateTime, Utc};

/// Earliest point of the window, in hours relative to scheduled departure.
pub const WINDOW_BEFORE_HOURS: f64 = -12.0;

/// Latest point of the window, in hours after scheduled departure.
pub const WINDOW_AFTER_HOURS: f64 = 24.0;

/// Hours elapsed since the scheduled departure. Negative when it is still in
/// the future.
pub fn hours_since(scheduled: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - scheduled).num_milliseconds() as f64 / 3_600_000.0
}

/// Whether a live lookup is worth attempting, inclusive at both edges.
pub fn is_worth_querying(scheduled: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let hours = hours_since(scheduled, now);
    (WINDOW_BEFORE_HOURS..=WINDOW_AFTER_HOURS).contains(&hours)
}
