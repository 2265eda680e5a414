pub mod config;
pub mod day;
pub mod events;
pub mod goal;
pub mod resolve;
pub mod team;

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use winnerforce_core::{CanonicalDay, DateLike, DayNormalizer};

/// Number of days `events` shows when no end is given
pub const DEFAULT_EVENT_DAYS: i64 = 7;

/// Turn a date argument into a `DateLike`, accepting "today" and "tomorrow".
///
/// A bare `YYYY-MM-DD` is the calendar day the user typed, whatever the
/// date-only policy applied to backend data.
pub fn date_arg(input: &str) -> DateLike {
    let trimmed = input.trim();
    match trimmed.to_lowercase().as_str() {
        "today" => Utc::now().into(),
        "tomorrow" => (Utc::now() + Duration::days(1)).into(),
        "yesterday" => (Utc::now() - Duration::days(1)).into(),
        _ => match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(date) => DateLike::Date(date),
            Err(_) => DateLike::Text(input.to_string()),
        },
    }
}

/// Parse a date argument to a day, with a readable error.
pub fn day_arg(input: &str, normalizer: &DayNormalizer) -> Result<CanonicalDay> {
    normalizer
        .normalize_to_day(&date_arg(input))
        .map_err(|e| anyhow::anyhow!("{}. Expected YYYY-MM-DD, an ISO date-time, \"today\" or \"tomorrow\"", e))
}

pub fn today(normalizer: &DayNormalizer) -> CanonicalDay {
    normalizer
        .normalize_to_day(&Utc::now().into())
        .unwrap_or_else(|_| CanonicalDay::new(Utc::now().date_naive()))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
