//! Free-slot search over one day's events.
//!
//! # Responsibility
//! - Find the earliest gap of a requested length inside the working window.
//! - Keep "never suggest the past" rounding in one place.
//!
//! # Invariants
//! - The cursor only moves forward, so nested or overlapping events collapse.
//! - Returned slots lie entirely inside the working window.
//! - When searching today, the search never starts before the next quantum
//!   boundary strictly after now.

use crate::model::event::{Event, CLOCK_FORMAT};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Rounding step applied to "now" when searching today.
pub const DEFAULT_SLOT_QUANTUM_MINUTES: u32 = 15;

/// Daily range considered by the slot search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub day_start: NaiveTime,
    pub day_end: NaiveTime,
    pub quantum_minutes: u32,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            day_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            day_end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
            quantum_minutes: DEFAULT_SLOT_QUANTUM_MINUTES,
        }
    }
}

/// A free interval suggested by the slot search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeSlot {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start.format(CLOCK_FORMAT),
            self.end.format(CLOCK_FORMAT)
        )
    }
}

/// Returns the earliest slot of `duration_minutes` on `date`, earliest-fit.
///
/// `events` must be the date's bucket, sorted by start ascending.
pub fn find_slot(
    events: &[Event],
    duration_minutes: u32,
    date: NaiveDate,
    now: NaiveDateTime,
    hours: &WorkingHours,
) -> Option<TimeSlot> {
    let needed = Duration::minutes(i64::from(duration_minutes));
    let window_end = date.and_time(hours.day_end);
    let mut cursor = search_start(date, now, hours);

    for event in events {
        if event.start >= window_end {
            break;
        }
        if event.start > cursor && event.start - cursor >= needed {
            return Some(TimeSlot::new(cursor, cursor + needed));
        }
        if event.end > cursor {
            cursor = event.end;
        }
    }

    if cursor < window_end && window_end - cursor >= needed {
        return Some(TimeSlot::new(cursor, cursor + needed));
    }
    None
}

/// Where the search cursor starts on `date` given the current instant.
pub fn search_start(date: NaiveDate, now: NaiveDateTime, hours: &WorkingHours) -> NaiveDateTime {
    let window_start = date.and_time(hours.day_start);
    if date == now.date() && now > window_start {
        round_up_to_quantum(now, hours.quantum_minutes)
    } else {
        window_start
    }
}

/// Next multiple of `quantum_minutes` past midnight strictly after `now`'s minute.
///
/// Seconds are ignored: 09:07:42 and 09:07:00 both round to 09:15.
pub fn round_up_to_quantum(now: NaiveDateTime, quantum_minutes: u32) -> NaiveDateTime {
    let quantum = i64::from(quantum_minutes.max(1));
    let elapsed = i64::from(now.hour()) * 60 + i64::from(now.minute());
    let next = (elapsed / quantum + 1) * quantum;
    now.date().and_time(NaiveTime::MIN) + Duration::minutes(next)
}

#[cfg(test)]
mod tests {
    use super::{find_slot, round_up_to_quantum, search_start, TimeSlot, WorkingHours};
    use crate::model::event::Event;
    use chrono::{NaiveDate, NaiveDateTime};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 14).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        day().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn yesterday() -> NaiveDateTime {
        day().pred_opt().unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn rounds_to_next_quarter_hour() {
        assert_eq!(round_up_to_quantum(at(9, 7), 15), at(9, 15));
        assert_eq!(round_up_to_quantum(at(9, 59), 15), at(10, 0));
        assert_eq!(round_up_to_quantum(at(9, 15), 15), at(9, 30));
    }

    #[test]
    fn rounding_past_midnight_rolls_to_next_day() {
        let late = day().and_hms_opt(23, 50, 0).unwrap();
        let next_midnight = day().succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(round_up_to_quantum(late, 15), next_midnight);
    }

    #[test]
    fn search_start_ignores_now_on_other_dates_and_before_window() {
        let hours = WorkingHours::default();
        assert_eq!(search_start(day(), yesterday(), &hours), at(8, 0));
        assert_eq!(search_start(day(), at(7, 30), &hours), at(8, 0));
        assert_eq!(search_start(day(), at(8, 0), &hours), at(8, 0));
        assert_eq!(search_start(day(), at(8, 1), &hours), at(8, 15));
    }

    #[test]
    fn nested_events_collapse_into_one_busy_block() {
        let events = vec![
            Event::new("outer", at(8, 0), at(12, 0)),
            Event::new("inner", at(9, 0), at(10, 0)),
        ];
        let slot = find_slot(&events, 60, day(), yesterday(), &WorkingHours::default());
        assert_eq!(slot, Some(TimeSlot::new(at(12, 0), at(13, 0))));
    }

    #[test]
    fn gap_before_event_outside_window_is_clamped_to_window_end() {
        let events = vec![
            Event::new("busy", at(8, 0), at(17, 30)),
            Event::new("evening", at(19, 0), at(20, 0)),
        ];
        let hours = WorkingHours::default();
        assert_eq!(find_slot(&events, 60, day(), yesterday(), &hours), None);
        assert_eq!(
            find_slot(&events, 30, day(), yesterday(), &hours),
            Some(TimeSlot::new(at(17, 30), at(18, 0)))
        );
    }

    #[test]
    fn earliest_fit_wins_over_best_fit() {
        let events = vec![
            Event::new("a", at(10, 0), at(11, 0)),
            Event::new("b", at(11, 30), at(12, 0)),
        ];
        let slot = find_slot(&events, 30, day(), yesterday(), &WorkingHours::default());
        assert_eq!(slot, Some(TimeSlot::new(at(8, 0), at(8, 30))));
    }

    #[test]
    fn time_range_uses_twelve_hour_clock() {
        assert_eq!(
            TimeSlot::new(at(12, 0), at(13, 0)).time_range(),
            "12:00 PM - 01:00 PM"
        );
    }
}
