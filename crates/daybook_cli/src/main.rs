//! Daybook command-line shell.
//!
//! # Responsibility
//! - Parse arguments and typed dates/times into core values.
//! - Render calendar results and errors as text.
//! - Keep every scheduling rule inside `daybook_core`.

mod cli;
mod input;
mod menu;
mod render;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run(cli::Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("  Error: {err}");
            ExitCode::FAILURE
        }
    }
}
