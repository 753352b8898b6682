//! Appointment calendar: date index, conflict checks and queries.
//!
//! # Responsibility
//! - Own the in-memory event collection, indexed by start date.
//! - Reject invalid ranges and overlapping bookings before storage.
//! - Rewrite the full collection through an `EventStore` after each mutation.
//!
//! # Invariants
//! - Every bucket holds only events starting on its date, sorted by start.
//! - No two events in one bucket overlap.
//! - Empty buckets are removed.
//! - Rejected mutations never touch storage; failed saves are rolled back.

use crate::config::CalendarConfig;
use crate::model::event::Event;
use crate::store::{EventStore, JsonFileStore, StoreError, StoreResult};
use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

pub mod clock;
pub mod slot;

pub use clock::{Clock, FixedClock, SystemClock};
pub use slot::{TimeSlot, WorkingHours};

pub type CalendarResult<T> = Result<T, CalendarError>;

/// Recoverable failures returned by calendar mutations.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("End time must be after start time.")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("This event overlaps with '{}' ({})", .existing.title, .existing.time_range())]
    Conflict { existing: Event },
    #[error("Invalid event number. Please choose 1-{max}.")]
    InvalidIndex { requested: usize, max: usize },
    #[error("failed to save calendar: {0}")]
    Store(#[from] StoreError),
}

/// Outcome of loading the store at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// Storage existed and decoded; holds the event count.
    Loaded(usize),
    /// Nothing stored yet.
    Missing,
    /// Storage was unreadable; the calendar started empty.
    Degraded(String),
}

/// Successful mutation, rendered as the user-facing confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Added(Event),
    Deleted(Event),
}

impl Change {
    pub fn event(&self) -> &Event {
        match self {
            Self::Added(event) | Self::Deleted(event) => event,
        }
    }
}

impl Display for Change {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added(event) => write!(f, "Event '{}' added successfully!", event.title),
            Self::Deleted(event) => write!(f, "Event '{}' deleted successfully!", event.title),
        }
    }
}

/// Single-user appointment book over a pluggable store.
pub struct Calendar<S: EventStore = JsonFileStore> {
    events_by_date: BTreeMap<NaiveDate, Vec<Event>>,
    store: S,
    clock: Box<dyn Clock>,
    working_hours: WorkingHours,
    load_report: LoadReport,
}

impl Calendar<JsonFileStore> {
    /// Opens the JSON data file named by `config` using the system clock.
    pub fn open_default(config: &CalendarConfig) -> Self {
        Calendar::open(JsonFileStore::new(&config.data_file), SystemClock)
            .with_working_hours(config.working_hours)
    }
}

impl<S: EventStore> Calendar<S> {
    /// Loads every stored event and builds the date index.
    ///
    /// Never fails: missing storage starts empty, unreadable storage starts
    /// empty and is reported through [`Calendar::load_report`].
    pub fn open(store: S, clock: impl Clock + 'static) -> Self {
        let mut calendar = Self {
            events_by_date: BTreeMap::new(),
            store,
            clock: Box::new(clock),
            working_hours: WorkingHours::default(),
            load_report: LoadReport::Missing,
        };
        calendar.load();
        calendar
    }

    pub fn with_working_hours(mut self, hours: WorkingHours) -> Self {
        self.working_hours = hours;
        self
    }

    pub fn working_hours(&self) -> &WorkingHours {
        &self.working_hours
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Total number of stored events across all dates.
    pub fn len(&self) -> usize {
        self.events_by_date.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.events_by_date.is_empty()
    }

    /// Dates that currently hold events, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.events_by_date.keys().copied().collect()
    }

    /// Adds an event unless its range is invalid or it overlaps an event on
    /// the same date.
    ///
    /// # Errors
    /// - `InvalidRange` when `end <= start`.
    /// - `Conflict` naming the earliest-starting overlapping event.
    /// - `Store` when the rewrite fails; the event is not kept.
    pub fn add_event(
        &mut self,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> CalendarResult<Change> {
        if end <= start {
            info!("event=event_add module=calendar status=rejected reason=invalid_range");
            return Err(CalendarError::InvalidRange { start, end });
        }

        let candidate = Event::new(title, start, end);
        let date = candidate.date();
        if let Some(existing) = self
            .events_by_date
            .get(&date)
            .and_then(|bucket| bucket.iter().find(|event| candidate.overlaps_with(event)))
        {
            info!(
                "event=event_add module=calendar status=rejected reason=conflict date={}",
                date
            );
            return Err(CalendarError::Conflict {
                existing: existing.clone(),
            });
        }

        let position = self.insert_sorted(candidate.clone());
        if let Err(err) = self.persist() {
            self.remove_at(date, position);
            return Err(err.into());
        }

        info!(
            "event=event_add module=calendar status=ok date={} total={}",
            date,
            self.len()
        );
        Ok(Change::Added(candidate))
    }

    /// Deletes the `index`-th (1-based) event on `date`.
    ///
    /// # Errors
    /// - `InvalidIndex` when `index` is outside `1..=events_on_date`.
    /// - `Store` when the rewrite fails; the event is restored.
    pub fn delete_event(&mut self, index: usize, date: NaiveDate) -> CalendarResult<Change> {
        let max = self.events_by_date.get(&date).map_or(0, Vec::len);
        if index < 1 || index > max {
            info!(
                "event=event_delete module=calendar status=rejected reason=invalid_index date={}",
                date
            );
            return Err(CalendarError::InvalidIndex {
                requested: index,
                max,
            });
        }

        let Some(removed) = self.remove_at(date, index - 1) else {
            return Err(CalendarError::InvalidIndex {
                requested: index,
                max,
            });
        };
        if let Err(err) = self.persist() {
            self.events_by_date
                .entry(date)
                .or_default()
                .insert(index - 1, removed);
            return Err(err.into());
        }

        info!(
            "event=event_delete module=calendar status=ok date={} total={}",
            date,
            self.len()
        );
        Ok(Change::Deleted(removed))
    }

    /// Copy of the date's events, sorted by start.
    pub fn events_for_date(&self, date: NaiveDate) -> Vec<Event> {
        self.events_by_date.get(&date).cloned().unwrap_or_default()
    }

    /// Today's events that have not ended yet: upcoming and in progress.
    pub fn remaining_events_today(&self) -> Vec<Event> {
        let now = self.clock.now();
        self.events_by_date
            .get(&now.date())
            .map(|bucket| {
                bucket
                    .iter()
                    .filter(|event| event.end > now)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Earliest free slot of `duration_minutes` inside the working window.
    ///
    /// `date` defaults to today. Absence means no gap is large enough.
    pub fn find_next_available_slot(
        &self,
        duration_minutes: u32,
        date: Option<NaiveDate>,
    ) -> Option<TimeSlot> {
        let now = self.clock.now();
        let date = date.unwrap_or_else(|| now.date());
        let bucket = self
            .events_by_date
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or_default();
        slot::find_slot(bucket, duration_minutes, date, now, &self.working_hours)
    }

    fn load(&mut self) {
        match self.store.load() {
            Ok(None) => {
                info!("event=calendar_load module=calendar status=ok source=missing count=0");
                self.load_report = LoadReport::Missing;
            }
            Ok(Some(events)) => {
                let count = events.len();
                for event in events {
                    self.insert_sorted(event);
                }
                info!(
                    "event=calendar_load module=calendar status=ok count={}",
                    count
                );
                self.load_report = LoadReport::Loaded(count);
            }
            Err(err) => {
                warn!(
                    "event=calendar_load module=calendar status=degraded error={}",
                    err
                );
                self.events_by_date.clear();
                self.load_report = LoadReport::Degraded(err.to_string());
            }
        }
    }

    /// Inserts after any events sharing the same start; returns the position.
    fn insert_sorted(&mut self, event: Event) -> usize {
        let bucket = self.events_by_date.entry(event.date()).or_default();
        let position = bucket.partition_point(|existing| existing.start <= event.start);
        bucket.insert(position, event);
        position
    }

    fn remove_at(&mut self, date: NaiveDate, position: usize) -> Option<Event> {
        let bucket = self.events_by_date.get_mut(&date)?;
        if position >= bucket.len() {
            return None;
        }
        let removed = bucket.remove(position);
        if bucket.is_empty() {
            self.events_by_date.remove(&date);
        }
        Some(removed)
    }

    fn persist(&self) -> StoreResult<()> {
        let flattened: Vec<Event> = self.events_by_date.values().flatten().cloned().collect();
        self.store.save(&flattened)
    }
}

#[cfg(test)]
mod tests {
    use super::{Calendar, CalendarError, Change, FixedClock, LoadReport};
    use crate::model::event::Event;
    use crate::store::MemoryStore;
    use chrono::{NaiveDate, NaiveDateTime};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 4).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        day().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn calendar(store: MemoryStore) -> Calendar<MemoryStore> {
        Calendar::open(store, FixedClock::new(at(7, 0)))
    }

    #[test]
    fn equal_start_times_keep_insertion_order() {
        let store = MemoryStore::with_events(vec![
            Event::new("first", at(9, 0), at(9, 30)),
            Event::new("second", at(9, 0), at(10, 0)),
        ]);
        let cal = calendar(store);

        let titles: Vec<_> = cal
            .events_for_date(day())
            .into_iter()
            .map(|event| event.title)
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn conflict_reports_earliest_overlapping_event() {
        let mut cal = calendar(MemoryStore::new());
        cal.add_event("early", at(9, 0), at(10, 0)).unwrap();
        cal.add_event("late", at(10, 0), at(11, 0)).unwrap();

        let err = cal.add_event("wide", at(9, 30), at(10, 30)).unwrap_err();
        match err {
            CalendarError::Conflict { existing } => assert_eq!(existing.title, "early"),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn failed_save_rolls_back_add_and_delete() {
        let store = MemoryStore::new();
        let mut cal = calendar(store.clone());
        cal.add_event("kept", at(9, 0), at(10, 0)).unwrap();

        store.set_fail_saves(true);
        let err = cal.add_event("lost", at(11, 0), at(12, 0)).unwrap_err();
        assert!(matches!(err, CalendarError::Store(_)));
        assert_eq!(cal.len(), 1);

        let err = cal.delete_event(1, day()).unwrap_err();
        assert!(matches!(err, CalendarError::Store(_)));
        assert_eq!(cal.events_for_date(day())[0].title, "kept");
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn change_messages_name_the_event() {
        let mut cal = calendar(MemoryStore::new());
        let added = cal.add_event("Lunch", at(12, 0), at(13, 0)).unwrap();
        assert_eq!(added.to_string(), "Event 'Lunch' added successfully!");

        let deleted = cal.delete_event(1, day()).unwrap();
        assert_eq!(deleted.to_string(), "Event 'Lunch' deleted successfully!");
        assert!(matches!(deleted, Change::Deleted(_)));
        assert!(cal.is_empty());
    }

    #[test]
    fn empty_store_reports_missing() {
        let cal = calendar(MemoryStore::new());
        assert_eq!(cal.load_report(), &LoadReport::Missing);
    }
}
