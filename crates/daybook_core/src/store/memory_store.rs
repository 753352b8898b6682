//! In-process event store.
//!
//! Clones share one backing buffer, so a caller can hand one handle to a
//! `Calendar` and keep another to inspect what was persisted.

use super::{EventStore, StoreError, StoreResult};
use crate::model::event::Event;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

#[derive(Debug, Default)]
struct MemoryState {
    events: Option<Vec<Event>>,
    save_count: usize,
    fail_saves: bool,
}

/// Event store that keeps the persisted list in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `events`.
    pub fn with_events(events: Vec<Event>) -> Self {
        let store = Self::new();
        store.state.borrow_mut().events = Some(events);
        store
    }

    /// Last persisted list, `None` if nothing was saved or seeded.
    pub fn snapshot(&self) -> Option<Vec<Event>> {
        self.state.borrow().events.clone()
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.state.borrow().save_count
    }

    /// Makes subsequent saves fail with an I/O error.
    pub fn set_fail_saves(&self, fail: bool) {
        self.state.borrow_mut().fail_saves = fail;
    }
}

impl EventStore for MemoryStore {
    fn load(&self) -> StoreResult<Option<Vec<Event>>> {
        Ok(self.state.borrow().events.clone())
    }

    fn save(&self, events: &[Event]) -> StoreResult<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_saves {
            return Err(StoreError::Io(io::Error::other("memory store rejected save")));
        }
        state.events = Some(events.to_vec());
        state.save_count += 1;
        Ok(())
    }
}
