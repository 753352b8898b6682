//! Interactive menu loop.
//!
//! Every prompt accepts `cancel` (or Esc) to return to the main menu.

use crate::cli::today;
use crate::input;
use crate::render;
use chrono::{Local, NaiveDate};
use daybook_core::{Calendar, EventStore};
use inquire::{InquireError, Select, Text};
use std::error::Error;

const CREATE: &str = "Create a new event";
const VIEW_DATE: &str = "View all events for a date";
const VIEW_REMAINING: &str = "View remaining events for today";
const FIND_SLOT: &str = "Find next available time slot";
const DELETE: &str = "Delete an event";
const EXIT: &str = "Exit";

pub fn run_menu<S: EventStore>(calendar: &mut Calendar<S>) -> Result<(), Box<dyn Error>> {
    println!("{}", render::header("SIMPLE CALENDAR & APPOINTMENT MANAGER"));
    println!("  {}", render::load_report(calendar.load_report()));

    loop {
        let choice = match Select::new(
            "MAIN MENU",
            vec![CREATE, VIEW_DATE, VIEW_REMAINING, FIND_SLOT, DELETE, EXIT],
        )
        .prompt()
        {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => EXIT,
            Err(err) => return Err(err.into()),
        };

        match choice {
            CREATE => create_event(calendar)?,
            VIEW_DATE => view_date(calendar)?,
            VIEW_REMAINING => view_remaining(calendar),
            FIND_SLOT => find_slot(calendar)?,
            DELETE => delete_event(calendar)?,
            _ => {
                println!("\n  Thank you for using Simple Calendar!");
                println!("  Your events have been saved. Goodbye!\n");
                return Ok(());
            }
        }
    }
}

/// Prompts once; `None` means the user cancelled.
fn ask(prompt: &str) -> Result<Option<String>, InquireError> {
    match Text::new(prompt).prompt() {
        Ok(answer) if answer.trim().eq_ignore_ascii_case("cancel") => Ok(None),
        Ok(answer) => Ok(Some(answer)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Re-prompts until `parse` accepts the answer or the user cancels.
fn ask_until<T>(
    prompt: &str,
    parse: impl Fn(&str) -> Result<T, input::InputError>,
) -> Result<Option<T>, InquireError> {
    loop {
        let Some(answer) = ask(prompt)? else {
            return Ok(None);
        };
        match parse(&answer) {
            Ok(value) => return Ok(Some(value)),
            Err(err) => println!("  {err}"),
        }
    }
}

fn ask_date(prompt: &str) -> Result<Option<NaiveDate>, InquireError> {
    ask_until(prompt, |answer| input::parse_date(answer, today()))
}

fn create_event<S: EventStore>(calendar: &mut Calendar<S>) -> Result<(), Box<dyn Error>> {
    println!("{}", render::header("Create New Event"));

    let title = match ask("Event title (or 'cancel'):")? {
        Some(title) if !title.trim().is_empty() => title.trim().to_string(),
        _ => {
            println!("  Event creation cancelled.");
            return Ok(());
        }
    };
    let Some(date) = ask_date("Date (MM-DD-YYYY) or press Enter for today:")? else {
        println!("  Event creation cancelled.");
        return Ok(());
    };
    println!("\n  Date selected: {}", render::long_date(date));

    let Some(start) = ask_until("Start time (e.g., 9:00 AM):", |answer| {
        input::parse_start_time(answer, date, Local::now().naive_local())
    })?
    else {
        println!("  Event creation cancelled.");
        return Ok(());
    };
    let Some(end) = ask_until("End time (e.g., 10:00 AM):", |answer| {
        input::parse_time(answer, date)
    })?
    else {
        println!("  Event creation cancelled.");
        return Ok(());
    };

    match calendar.add_event(title, start, end) {
        Ok(change) => println!("\n  {change}"),
        Err(err) => println!("\n  Error: {err}"),
    }
    Ok(())
}

fn view_date<S: EventStore>(calendar: &Calendar<S>) -> Result<(), Box<dyn Error>> {
    println!("{}", render::header("View Events for a Date"));
    let Some(date) = ask_date("Enter date (MM-DD-YYYY) or press Enter for today:")? else {
        return Ok(());
    };
    println!("\n  Events for {}:\n", render::long_date(date));
    print!(
        "{}",
        render::event_list(
            &calendar.events_for_date(date),
            "No events scheduled for this date."
        )
    );
    Ok(())
}

fn view_remaining<S: EventStore>(calendar: &Calendar<S>) {
    println!("{}", render::header("Remaining Events Today"));
    let now = Local::now().naive_local();
    println!("  Date: {}", render::long_date(now.date()));
    println!("  Current time: {}\n", now.format("%I:%M %p"));
    print!(
        "{}",
        render::event_list(
            &calendar.remaining_events_today(),
            "No remaining events for today."
        )
    );
}

fn find_slot<S: EventStore>(calendar: &Calendar<S>) -> Result<(), Box<dyn Error>> {
    println!("{}", render::header("Find Available Time Slot"));
    let Some(minutes) = ask_until(
        "How many minutes do you need? (e.g., 30, 60):",
        input::parse_duration,
    )?
    else {
        return Ok(());
    };
    let Some(date) = ask_date("Enter date (MM-DD-YYYY) or press Enter for today:")? else {
        return Ok(());
    };

    println!(
        "\n  Searching for a {minutes}-minute slot on {}...",
        render::long_date(date)
    );
    let slot = calendar.find_next_available_slot(minutes, Some(date));
    println!("{}", render::slot(slot.as_ref()));
    Ok(())
}

fn delete_event<S: EventStore>(calendar: &mut Calendar<S>) -> Result<(), Box<dyn Error>> {
    println!("{}", render::header("Delete an Event"));
    let Some(date) = ask_date("Enter date of event (MM-DD-YYYY) or press Enter for today:")?
    else {
        return Ok(());
    };

    let events = calendar.events_for_date(date);
    if events.is_empty() {
        println!("\n  No events found for {}.", render::long_date(date));
        return Ok(());
    }
    println!("\n  Events for {}:\n", render::long_date(date));
    print!("{}", render::event_list(&events, "No events found."));

    let prompt = format!("Enter event number to delete (1-{}) or 'cancel':", events.len());
    let Some(index) = ask_until(&prompt, input::parse_index)? else {
        println!("  Deletion cancelled.");
        return Ok(());
    };
    match calendar.delete_event(index, date) {
        Ok(change) => println!("\n  {change}"),
        Err(err) => println!("\n  Error: {err}"),
    }
    Ok(())
}
