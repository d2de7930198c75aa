// Date and time text as it lives in the sheet.
//
// Responsibilities
// - Parse the day column in the formats the sheet holds.
// - Normalize time of day to HH:MM:SS.
// - Recompose the combined timestamp written by the row editor.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static TIME_OF_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{1,2})(?::(\d{1,2}))?$").expect("time pattern is valid")
});

/// Day column formats, in the order they are tried.
const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

/// "9:5" -> "09:05:00", "23:59:59" -> "23:59:59". Anything unparsable or out of range gives "".
pub fn normalize_time(raw: &str) -> String {
    let Some(captures) = TIME_OF_DAY.captures(raw.trim()) else {
        return String::new();
    };
    let part = |index: usize| -> u32 {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    let (hours, minutes, seconds) = (part(1), part(2), part(3));
    if hours > 23 || minutes > 59 || seconds > 59 {
        return String::new();
    }
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// `DD/MM/YYYY`, `YYYY-MM-DD`, or an ISO date-time starting with `YYYY-MM-DD`.
pub fn parse_sheet_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            raw.get(..10)
                .filter(|_| raw.as_bytes().get(10) == Some(&b'T'))
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("invalid date: {0}")]
    Date(String),

    #[error("invalid time: {0}")]
    Time(String),
}

/// `"<date> <HH:MM:SS>"` when both parts are given, `""` when either is missing.
/// Both parts must parse when present.
pub fn compose_timestamp(date: &str, time: &str) -> Result<String, TimestampError> {
    let (date, time) = (date.trim(), time.trim());
    if date.is_empty() || time.is_empty() {
        return Ok(String::new());
    }
    if parse_sheet_date(date).is_none() {
        return Err(TimestampError::Date(date.to_string()));
    }
    let normalized = normalize_time(time);
    if normalized.is_empty() {
        return Err(TimestampError::Time(time.to_string()));
    }
    Ok(format!("{date} {normalized}"))
}

/// Decimal hours ("7.5", "7,5") or a duration ("7:30", "7:30:00"). Durations may exceed 24 hours.
pub fn parse_worked_hours(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.contains(':') {
        let parts: Vec<&str> = raw.split(':').collect();
        if parts.len() > 3 {
            return None;
        }
        let mut values = parts.iter().map(|p| p.parse::<u32>().ok());
        let hours = values.next().flatten()?;
        let minutes = values.next().flatten()?;
        let seconds = match values.next() {
            Some(value) => value?,
            None => 0,
        };
        if minutes > 59 || seconds > 59 {
            return None;
        }
        return Some(hours as f64 + minutes as f64 / 60.0 + seconds as f64 / 3600.0);
    }
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|hours| hours.is_finite() && *hours >= 0.0)
}
