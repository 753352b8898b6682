//! Text rendering for calendar results.

use chrono::NaiveDate;
use daybook_core::{Event, LoadReport, TimeSlot};

const RULE_WIDTH: usize = 50;

pub fn header(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("\n{rule}\n  {title}\n{rule}")
}

/// `Tuesday, March 10, 2026`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %d, %Y").to_string()
}

/// Numbered event list, or `empty_message` when there is nothing to show.
pub fn event_list(events: &[Event], empty_message: &str) -> String {
    if events.is_empty() {
        return format!("  {empty_message}\n");
    }
    events
        .iter()
        .enumerate()
        .map(|(position, event)| {
            format!(
                "  {}. {}\n     Time: {}\n\n",
                position + 1,
                event.title,
                event.time_range()
            )
        })
        .collect()
}

pub fn slot(slot: Option<&TimeSlot>) -> String {
    match slot {
        Some(slot) => format!("\n  Available slot found!\n  Time: {}", slot.time_range()),
        None => "\n  No available slot found for the requested duration.\n  Try a shorter duration or a different date."
            .to_string(),
    }
}

pub fn load_report(report: &LoadReport) -> String {
    match report {
        LoadReport::Loaded(count) => format!("Loaded {count} existing event(s) from storage."),
        LoadReport::Missing => {
            "No existing calendar data found. Starting with empty calendar.".to_string()
        }
        LoadReport::Degraded(reason) => {
            format!("Warning: Could not load saved events ({reason}). Starting fresh.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{event_list, header, load_report, long_date, slot};
    use chrono::NaiveDate;
    use daybook_core::{Event, LoadReport, TimeSlot};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn event_list_numbers_from_one() {
        let events = vec![
            Event::new(
                "Standup",
                day().and_hms_opt(9, 0, 0).unwrap(),
                day().and_hms_opt(9, 15, 0).unwrap(),
            ),
            Event::new(
                "Review",
                day().and_hms_opt(15, 0, 0).unwrap(),
                day().and_hms_opt(16, 0, 0).unwrap(),
            ),
        ];

        let text = event_list(&events, "unused");
        assert!(text.contains("  1. Standup\n     Time: 09:00 AM - 09:15 AM"));
        assert!(text.contains("  2. Review\n     Time: 03:00 PM - 04:00 PM"));
    }

    #[test]
    fn empty_list_shows_message() {
        assert_eq!(event_list(&[], "Nothing here."), "  Nothing here.\n");
    }

    #[test]
    fn dates_and_headers_render() {
        assert_eq!(long_date(day()), "Tuesday, March 10, 2026");
        assert!(header("MAIN MENU").contains("\n  MAIN MENU\n"));
    }

    #[test]
    fn slot_and_load_messages_render() {
        let found = TimeSlot::new(
            day().and_hms_opt(9, 0, 0).unwrap(),
            day().and_hms_opt(10, 0, 0).unwrap(),
        );
        assert!(slot(Some(&found)).contains("09:00 AM - 10:00 AM"));
        assert!(slot(None).contains("No available slot"));
        assert!(load_report(&LoadReport::Degraded("bad json".into())).contains("bad json"));
        assert_eq!(
            load_report(&LoadReport::Loaded(2)),
            "Loaded 2 existing event(s) from storage."
        );
    }
}
