//! Durable storage for the event collection.
//!
//! # Responsibility
//! - Define the load/save contract the calendar persists through.
//! - Keep file formats and I/O details out of calendar logic.
//!
//! # Invariants
//! - `save` always receives and writes the complete collection.
//! - `load` returns `Ok(None)` when nothing was ever stored, never an error.

use crate::model::event::Event;

pub mod json_store;
pub mod memory_store;

pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failure while reading or rewriting the event list.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored events could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to replace data file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Whole-collection persistence contract used by `Calendar`.
pub trait EventStore {
    /// Reads every stored event, or `None` when storage does not exist yet.
    fn load(&self) -> StoreResult<Option<Vec<Event>>>;
    /// Replaces stored contents with `events`.
    fn save(&self, events: &[Event]) -> StoreResult<()>;
}
