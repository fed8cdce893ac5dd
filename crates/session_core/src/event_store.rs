use shared::{
    domain::{DemoEvent, EventEntry, EventId},
    error::DemoError,
};
use tracing::{debug, warn};

use crate::Demo;

/// Ordered event collection for one open demo, keyed by session-local ids.
///
/// Identifiers are handed out by a counter that only ever increases, so an
/// id deleted mid-session is never reissued. List order is display order;
/// it is written back to the demo as-is and never re-sorted by tick.
#[derive(Debug, Default)]
pub struct EventStore {
    entries: Vec<EventEntry>,
    next_id: i64,
}

impl EventStore {
    /// Builds a fresh collection from the demo's raw event list, assigning
    /// ids `0..n-1` in file order.
    pub fn load(demo: &dyn Demo) -> Self {
        let mut store = Self::default();
        for event in demo.events() {
            let id = store.allocate_id();
            store.entries.push(EventEntry::new(id, event));
        }
        store
    }

    fn allocate_id(&mut self) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn entries(&self) -> &[EventEntry] {
        &self.entries
    }

    pub fn get(&self, id: EventId) -> Option<&EventEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value the next assigned identifier will take.
    pub fn next_id(&self) -> i64 {
        self.next_id
    }

    /// Appends an event under a freshly assigned id and writes the
    /// collection back. The assignment stands even if the write fails; the
    /// collection and the file then diverge until the next successful write.
    pub fn add(&mut self, demo: &mut dyn Demo, event: DemoEvent) -> Result<EventId, DemoError> {
        let id = self.allocate_id();
        self.entries.push(EventEntry::new(id, event));
        self.persist(demo)?;
        Ok(id)
    }

    /// Replaces the payload of the entry with the matching id, in place.
    /// An unknown id is a caller contract violation and is ignored.
    pub fn edit(&mut self, demo: &mut dyn Demo, entry: EventEntry) -> Result<(), DemoError> {
        let Some(slot) = self.entries.iter_mut().find(|e| e.id == entry.id) else {
            warn!(id = entry.id.0, "edit for unknown event id ignored");
            return Ok(());
        };
        slot.event = entry.event;
        self.persist(demo)
    }

    /// Removes the entry with the matching id, keeping the relative order of
    /// the rest. An unknown id is ignored, like in `edit`.
    pub fn delete(&mut self, demo: &mut dyn Demo, id: EventId) -> Result<(), DemoError> {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            warn!(id = id.0, "delete for unknown event id ignored");
            return Ok(());
        };
        self.entries.remove(index);
        self.persist(demo)
    }

    /// Writes the events back to the demo in current list order.
    pub fn persist(&self, demo: &mut dyn Demo) -> Result<(), DemoError> {
        let events: Vec<DemoEvent> = self.entries.iter().map(|entry| entry.event.clone()).collect();
        debug!(events = events.len(), "writing event list back to demo");
        demo.write_events(&events)
    }
}

#[cfg(test)]
#[path = "tests/event_store_tests.rs"]
mod tests;
