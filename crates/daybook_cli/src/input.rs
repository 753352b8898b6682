//! Free-form input parsing for the shell.
//!
//! # Responsibility
//! - Turn typed dates, times, durations and list numbers into core values.
//! - Refuse dates and start times that already lie in the past.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Accepted date spellings, tried in order (US month-first preferred).
const DATE_FORMATS: [&str; 3] = ["%m-%d-%Y", "%m/%d/%Y", "%Y-%m-%d"];
/// Accepted time spellings; hour-only input is widened to `:00` first.
const TIME_FORMATS: [&str; 3] = ["%I:%M %p", "%I:%M%p", "%H:%M"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Invalid date format. Please use MM-DD-YYYY or MM/DD/YYYY")]
    BadDate(String),
    #[error("Cannot schedule events in the past. Please enter today's date or a future date.")]
    PastDate(NaiveDate),
    #[error("Invalid time format. Examples: 2:30 PM, 14:30, 9 AM")]
    BadTime(String),
    #[error("Cannot schedule events in the past. Please enter a future time.")]
    PastTime(NaiveDateTime),
    #[error("Please enter a valid number.")]
    BadNumber(String),
    #[error("Please enter a positive number.")]
    NotPositive,
}

/// Parses a date; blank input means `today`. Dates before `today` are refused.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(today);
    }
    let date = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| InputError::BadDate(trimmed.to_string()))?;
    if date < today {
        return Err(InputError::PastDate(date));
    }
    Ok(date)
}

/// Parses a clock time and places it on `date`.
pub fn parse_time(input: &str, date: NaiveDate) -> Result<NaiveDateTime, InputError> {
    let normalized = with_minutes(&input.trim().to_ascii_uppercase());
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&normalized, format).ok())
        .map(|time| date.and_time(time))
        .ok_or_else(|| InputError::BadTime(input.trim().to_string()))
}

/// Like [`parse_time`] but refuses instants earlier than `now`.
pub fn parse_start_time(
    input: &str,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Result<NaiveDateTime, InputError> {
    let start = parse_time(input, date)?;
    if start < now {
        return Err(InputError::PastTime(start));
    }
    Ok(start)
}

/// Parses a strictly positive minute count.
pub fn parse_duration(input: &str) -> Result<u32, InputError> {
    let minutes = parse_number(input)?;
    u32::try_from(minutes).map_err(|_| InputError::BadNumber(input.trim().to_string()))
}

/// Parses a 1-based list position.
pub fn parse_index(input: &str) -> Result<usize, InputError> {
    let value = input
        .trim()
        .parse::<usize>()
        .map_err(|_| InputError::BadNumber(input.trim().to_string()))?;
    Ok(value)
}

fn parse_number(input: &str) -> Result<i64, InputError> {
    let value = input
        .trim()
        .parse::<i64>()
        .map_err(|_| InputError::BadNumber(input.trim().to_string()))?;
    if value <= 0 {
        return Err(InputError::NotPositive);
    }
    Ok(value)
}

/// `"2 PM"` -> `"2:00 PM"`, `"2PM"` -> `"2:00PM"`, `"14"` -> `"14:00"`.
fn with_minutes(input: &str) -> String {
    if input.contains(':') {
        return input.to_string();
    }
    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    format!("{}:00{}", &input[..split], &input[split..])
}
