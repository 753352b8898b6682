//! Event domain model.
//!
//! # Responsibility
//! - Define the time-bounded appointment record.
//! - Provide the overlap predicate used by conflict detection.
//! - Own the wire shape written to the JSON data file.
//!
//! # Invariants
//! - Serialization round-trips `title`, `start` and `end` exactly.
//! - `overlaps_with` is symmetric; touching boundaries do not overlap.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// 12-hour clock format used for human-facing time ranges.
pub const CLOCK_FORMAT: &str = "%I:%M %p";

/// A single appointment with a naive (timezone-less) time range.
///
/// Serialized as `{"title", "start", "end"}` with ISO-8601 timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    /// Older data files name this field `start_time`.
    #[serde(alias = "start_time")]
    pub start: NaiveDateTime,
    #[serde(alias = "end_time")]
    pub end: NaiveDateTime,
}

impl Event {
    /// Builds an event without validating the range.
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            start,
            end,
        }
    }

    /// Returns whether the two half-open ranges intersect.
    ///
    /// Partial overlap, containment in either direction and identical ranges
    /// all count. Back-to-back events (`a.end == b.start`) do not.
    pub fn overlaps_with(&self, other: &Event) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Date bucket this event belongs to.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Formats the range as `09:00 AM - 10:00 AM`.
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start.format(CLOCK_FORMAT),
            self.end.format(CLOCK_FORMAT)
        )
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} from {} to {}",
            self.title,
            self.start.format("%Y-%m-%d"),
            self.start.format(CLOCK_FORMAT),
            self.end.format(CLOCK_FORMAT)
        )
    }
}
