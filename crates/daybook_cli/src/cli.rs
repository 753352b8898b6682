use crate::input;
use crate::menu;
use crate::render;
use chrono::Local;
use clap::{Parser, Subcommand};
use daybook_core::{init_logging, Calendar, CalendarConfig, JsonFileStore, LoadReport};
use log::warn;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "daybook", version, about = "Single-user appointment book")]
pub struct Cli {
    /// JSON file holding all events.
    #[arg(long, global = true, env = "DAYBOOK_DATA_FILE")]
    data_file: Option<PathBuf>,
    /// Directory for rotating log files; logging is off when unset.
    #[arg(long, global = true, env = "DAYBOOK_LOG_DIR")]
    log_dir: Option<PathBuf>,
    #[arg(long, global = true, env = "DAYBOOK_LOG_LEVEL")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Book a new event.
    Add {
        title: String,
        /// MM-DD-YYYY, MM/DD/YYYY or YYYY-MM-DD; defaults to today.
        #[arg(long, default_value = "")]
        date: String,
        /// e.g. "9:00 AM" or 14:30
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Show all events on a date.
    List {
        #[arg(long, default_value = "")]
        date: String,
    },
    /// Show today's events that have not ended yet.
    Remaining,
    /// Find the earliest free slot of the given length in minutes.
    FindSlot {
        minutes: String,
        #[arg(long, default_value = "")]
        date: String,
    },
    /// Delete the Nth event (as numbered by `list`) on a date.
    Delete {
        index: String,
        #[arg(long, default_value = "")]
        date: String,
    },
    /// Interactive menu (default).
    Menu,
}

pub fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(&cli)?;
    if let Some(dir) = &config.log_dir {
        init_logging(&config.log_level, dir)?;
    }

    let mut calendar = Calendar::open_default(&config);
    if let LoadReport::Degraded(reason) = calendar.load_report() {
        warn!("event=cli_start module=cli status=degraded");
        eprintln!("  Warning: Could not load saved events ({reason}). Starting fresh.");
    }

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Add {
            title,
            date,
            start,
            end,
        } => add(&mut calendar, &title, &date, &start, &end),
        Commands::List { date } => {
            let date = input::parse_date(&date, today())?;
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
        Commands::Remaining => {
            print!(
                "{}",
                render::event_list(
                    &calendar.remaining_events_today(),
                    "No remaining events for today."
                )
            );
            Ok(())
        }
        Commands::FindSlot { minutes, date } => {
            let minutes = input::parse_duration(&minutes)?;
            let date = input::parse_date(&date, today())?;
            let slot = calendar.find_next_available_slot(minutes, Some(date));
            println!("{}", render::slot(slot.as_ref()));
            Ok(())
        }
        Commands::Delete { index, date } => {
            let index = input::parse_index(&index)?;
            let date = input::parse_date(&date, today())?;
            let change = calendar.delete_event(index, date)?;
            println!("  {change}");
            Ok(())
        }
        Commands::Menu => menu::run_menu(&mut calendar),
    }
}

fn add(
    calendar: &mut Calendar<JsonFileStore>,
    title: &str,
    date: &str,
    start: &str,
    end: &str,
) -> Result<(), Box<dyn Error>> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Event title cannot be empty.".into());
    }
    let now = Local::now().naive_local();
    let date = input::parse_date(date, now.date())?;
    let start = input::parse_start_time(start, date, now)?;
    let end = input::parse_time(end, date)?;
    let change = calendar.add_event(title, start, end)?;
    println!("  {change}");
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<CalendarConfig, Box<dyn Error>> {
    let mut config = CalendarConfig::from_env()?;
    if let Some(path) = &cli.data_file {
        config.data_file = path.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    if let Some(dir) = config.log_dir.take() {
        config.log_dir = Some(if dir.is_absolute() {
            dir
        } else {
            std::env::current_dir()?.join(dir)
        });
    }
    Ok(config)
}

pub(crate) fn today() -> chrono::NaiveDate {
    Local::now().date_naive()
}
