//! Core scheduling logic for Daybook.
//! This crate owns the booking invariants: no overlaps, sorted date buckets,
//! and earliest-fit slot search. It never parses user text and never prints.

pub mod calendar;
pub mod config;
pub mod logging;
pub mod model;
pub mod store;

pub use calendar::{
    Calendar, CalendarError, CalendarResult, Change, Clock, FixedClock, LoadReport, SystemClock,
    TimeSlot, WorkingHours,
};
pub use config::{CalendarConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::event::Event;
pub use store::{EventStore, JsonFileStore, MemoryStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
