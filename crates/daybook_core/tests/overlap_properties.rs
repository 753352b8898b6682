//! Property tests for the overlap predicate and bucket ordering.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use daybook_core::{Calendar, Event, FixedClock, MemoryStore};
use proptest::prelude::*;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Events within one day, start minute in `0..1380`, length `1..=60`.
fn arb_event() -> impl Strategy<Value = Event> {
    (0i64..1380, 1i64..=60).prop_map(|(offset, length)| {
        let start = base() + Duration::minutes(offset);
        Event::new("e", start, start + Duration::minutes(length))
    })
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in arb_event(), b in arb_event()) {
        prop_assert_eq!(a.overlaps_with(&b), b.overlaps_with(&a));
    }

    #[test]
    fn adjacent_events_never_overlap(a in arb_event(), length in 1i64..=60) {
        let b = Event::new("next", a.end, a.end + Duration::minutes(length));
        prop_assert!(!a.overlaps_with(&b));
        prop_assert!(!b.overlaps_with(&a));
    }

    #[test]
    fn contained_events_overlap(a in arb_event(), lead in 0i64..=30, trail in 0i64..=30) {
        let outer = Event::new(
            "outer",
            a.start - Duration::minutes(lead),
            a.end + Duration::minutes(trail),
        );
        prop_assert!(outer.overlaps_with(&a));
        prop_assert!(a.overlaps_with(&outer));
    }

    #[test]
    fn buckets_stay_sorted_and_conflict_free(events in prop::collection::vec(arb_event(), 0..40)) {
        let mut cal = Calendar::open(MemoryStore::new(), FixedClock::new(base()));
        for event in events {
            let _ = cal.add_event(event.title, event.start, event.end);
        }

        let stored = cal.events_for_date(base().date());
        prop_assert_eq!(stored.len(), cal.len());
        for pair in stored.windows(2) {
            prop_assert!(pair[0].start <= pair[1].start);
            prop_assert!(!pair[0].overlaps_with(&pair[1]));
        }
    }
}
