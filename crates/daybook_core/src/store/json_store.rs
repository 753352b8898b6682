//! JSON file store.
//!
//! # Responsibility
//! - Read and write the flat JSON array of event records.
//! - Replace the data file via temp-file-then-rename.
//!
//! # Invariants
//! - A crash during `save` leaves the previous file intact.
//! - The file holds a bare array: no envelope, no schema version.

use super::{EventStore, StoreError, StoreResult};
use crate::model::event::Event;
use log::{error, info};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Event store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_atomically(&self, events: &[Event]) -> StoreResult<()> {
        let dir = self.parent_dir();
        std::fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut temp, events)?;
        temp.write_all(b"\n")?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path)?;
        Ok(())
    }
}

impl EventStore for JsonFileStore {
    fn load(&self) -> StoreResult<Option<Vec<Event>>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err)),
        };
        let events: Vec<Event> = serde_json::from_slice(&bytes)?;
        Ok(Some(events))
    }

    fn save(&self, events: &[Event]) -> StoreResult<()> {
        let started_at = Instant::now();
        match self.write_atomically(events) {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok count={} duration_ms={}",
                    events.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
