//! Domain model for the appointment book.
//!
//! # Responsibility
//! - Define the canonical event value shared by storage, calendar and shell.
//!
//! # Invariants
//! - Events carry no identity; position inside a date bucket identifies them.
//! - Range validation (`end > start`) belongs to the calendar add path.

pub mod event;
