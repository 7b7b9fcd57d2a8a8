//! Per-sport roster
//!
//! Entries are replaced wholesale on every events tick and never removed.
//! The lock is only held for map access; callers never await while holding
//! it.

use normalizer::{RawEvent, RosterEntry};
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Default)]
pub struct Roster {
    entries: Mutex<HashMap<i64, RosterEntry>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entry of every event. Returns the roster size.
    pub fn replace(&self, events: &[RawEvent]) -> usize {
        let mut entries = self.entries.lock();
        for event in events {
            entries.insert(event.id, RosterEntry::from_event(event));
        }
        entries.len()
    }

    /// Tennis variant: top-level matches point at themselves and children
    /// whose parent is unknown get a parent synthesized from their names.
    pub fn replace_tennis(&self, events: &[RawEvent]) -> usize {
        let mut entries = self.entries.lock();
        for event in events {
            entries.insert(event.id, RosterEntry::from_tennis_event(event));

            if event.parent_id != 0 && !entries.contains_key(&event.parent_id) {
                entries.insert(event.parent_id, RosterEntry::parent_of(event));
            }
        }
        entries.len()
    }

    pub fn get(&self, id: i64) -> Option<RosterEntry> {
        self.entries.lock().get(&id).cloned()
    }

    /// Run `f` against the whole roster under the lock
    pub fn with_entries<R>(&self, f: impl FnOnce(&HashMap<i64, RosterEntry>) -> R) -> R {
        f(&self.entries.lock())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
