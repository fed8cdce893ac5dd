use std::path::{Path, PathBuf};

use shared::{
    domain::{DemoEvent, DemoHeader, EventEntry, EventId},
    error::{DemoError, DemoOp},
};
use tracing::{info, warn};

pub mod config;
mod event_store;

pub use event_store::EventStore;

const NEW_BOOKMARK_NAME: &str = "Bookmark";
const NEW_BOOKMARK_VALUE: &str = "New Bookmark";

/// Template an add dialog opens with: a bookmark at tick 0 and no assigned id.
pub fn new_bookmark_template() -> DemoEvent {
    DemoEvent {
        tick: 0,
        name: NEW_BOOKMARK_NAME.to_string(),
        value: NEW_BOOKMARK_VALUE.to_string(),
    }
}

/// A recorded game-session file. The file format, the on-disk writes and the
/// OS-level rename/delete all live behind this trait; the session layer only
/// sees the header, the raw event list and the mutating operations.
pub trait Demo {
    fn short_name(&self) -> String;
    /// Full path of the backing file, for "reveal in file manager" style
    /// actions outside the session layer.
    fn filename(&self) -> &Path;
    fn header(&self) -> &DemoHeader;
    fn events(&self) -> Vec<DemoEvent>;
    /// Replaces the demo's persisted event list wholesale.
    fn write_events(&mut self, events: &[DemoEvent]) -> Result<(), DemoError>;
    fn rename(&mut self, new_name: &str) -> Result<(), DemoError>;
    fn delete(&mut self) -> Result<(), DemoError>;
}

/// In-memory `Demo` used for wiring and tests; nothing touches the disk.
pub struct MemoryDemo {
    name: String,
    filename: PathBuf,
    header: DemoHeader,
    events: Vec<DemoEvent>,
    deleted: bool,
}

impl MemoryDemo {
    pub fn new(name: impl Into<String>, header: DemoHeader, events: Vec<DemoEvent>) -> Self {
        let name = name.into();
        let filename = PathBuf::from(format!("{name}.dem"));
        Self {
            name,
            filename,
            header,
            events,
            deleted: false,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}

impl Demo for MemoryDemo {
    fn short_name(&self) -> String {
        self.name.clone()
    }

    fn filename(&self) -> &Path {
        &self.filename
    }

    fn header(&self) -> &DemoHeader {
        &self.header
    }

    fn events(&self) -> Vec<DemoEvent> {
        self.events.clone()
    }

    fn write_events(&mut self, events: &[DemoEvent]) -> Result<(), DemoError> {
        if self.deleted {
            return Err(DemoError::new(
                DemoOp::WriteEvents,
                format!("demo '{}' was deleted", self.name),
            ));
        }
        self.events = events.to_vec();
        Ok(())
    }

    fn rename(&mut self, new_name: &str) -> Result<(), DemoError> {
        if self.deleted {
            return Err(DemoError::new(
                DemoOp::Rename,
                format!("demo '{}' was deleted", self.name),
            ));
        }
        self.name = new_name.to_string();
        self.filename = PathBuf::from(format!("{new_name}.dem"));
        Ok(())
    }

    fn delete(&mut self) -> Result<(), DemoError> {
        if self.deleted {
            return Err(DemoError::new(
                DemoOp::Delete,
                format!("demo '{}' was already deleted", self.name),
            ));
        }
        self.deleted = true;
        Ok(())
    }
}

/// Payload of the event dialog: what it was opened for and its prefill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDialog {
    Add { event: DemoEvent },
    Edit { id: EventId, event: DemoEvent },
}

/// Which modal, if any, the presentation layer should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    EditEvent(EventDialog),
    ConfirmDelete,
    ConfirmRename,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Viewing,
    EditingEvent,
    ConfirmingDelete,
    ConfirmingRename,
}

struct OpenDemo<D: Demo> {
    demo: D,
    store: EventStore,
    modal: Option<Modal>,
}

/// Tracks which demo is open and drives the editing dialogs. Every mutation
/// is persisted through the demo's own write operation the moment it is
/// confirmed, so closing never has unsaved work to flush.
pub struct DemoSession<D: Demo> {
    current: Option<OpenDemo<D>>,
}

impl<D: Demo> DemoSession<D> {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn state(&self) -> SessionState {
        match &self.current {
            None => SessionState::Closed,
            Some(open) => match &open.modal {
                None => SessionState::Viewing,
                Some(Modal::EditEvent(_)) => SessionState::EditingEvent,
                Some(Modal::ConfirmDelete) => SessionState::ConfirmingDelete,
                Some(Modal::ConfirmRename) => SessionState::ConfirmingRename,
            },
        }
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.current.as_ref().and_then(|open| open.modal.as_ref())
    }

    pub fn demo(&self) -> Option<&D> {
        self.current.as_ref().map(|open| &open.demo)
    }

    pub fn demo_name(&self) -> Option<String> {
        self.current.as_ref().map(|open| open.demo.short_name())
    }

    pub fn header(&self) -> Option<&DemoHeader> {
        self.current.as_ref().map(|open| open.demo.header())
    }

    pub fn entries(&self) -> &[EventEntry] {
        self.current
            .as_ref()
            .map(|open| open.store.entries())
            .unwrap_or_default()
    }

    pub fn store(&self) -> Option<&EventStore> {
        self.current.as_ref().map(|open| &open.store)
    }

    /// Opens a demo for viewing. Any previously open session is discarded
    /// wholesale, including its event collection and identifier counter.
    pub fn view_demo(&mut self, demo: D) {
        let store = EventStore::load(&demo);
        info!(
            demo = %demo.short_name(),
            events = store.len(),
            "opened demo session"
        );
        self.current = Some(OpenDemo {
            demo,
            store,
            modal: None,
        });
    }

    /// Closes the session and hands the demo back to the caller. The demo is
    /// not written to; every confirmed mutation was persisted already.
    pub fn close(&mut self) -> Option<D> {
        let open = self.current.take()?;
        info!(demo = %open.demo.short_name(), "closed demo session");
        Some(open.demo)
    }

    pub fn add_event(&mut self) {
        let Some(open) = &mut self.current else { return };
        if open.modal.is_some() {
            return;
        }
        open.modal = Some(Modal::EditEvent(EventDialog::Add {
            event: new_bookmark_template(),
        }));
    }

    pub fn edit_event(&mut self, entry: EventEntry) {
        let Some(open) = &mut self.current else { return };
        if open.modal.is_some() {
            return;
        }
        open.modal = Some(Modal::EditEvent(EventDialog::Edit {
            id: entry.id,
            event: entry.event,
        }));
    }

    /// Confirms an add dialog. Returns the identifier assigned to the new
    /// event, or `None` when no add dialog was open.
    pub fn add_callback(&mut self, event: DemoEvent) -> Result<Option<EventId>, DemoError> {
        let Some(open) = &mut self.current else {
            return Ok(None);
        };
        if !matches!(open.modal, Some(Modal::EditEvent(EventDialog::Add { .. }))) {
            return Ok(None);
        }
        open.modal = None;
        let id = open.store.add(&mut open.demo, event)?;
        Ok(Some(id))
    }

    /// Confirms an edit dialog, replacing the payload of the entry with the
    /// matching identifier.
    pub fn edit_callback(&mut self, entry: EventEntry) -> Result<(), DemoError> {
        let Some(open) = &mut self.current else {
            return Ok(());
        };
        if !matches!(open.modal, Some(Modal::EditEvent(EventDialog::Edit { .. }))) {
            return Ok(());
        }
        open.modal = None;
        open.store.edit(&mut open.demo, entry)
    }

    /// Deletes an event from the open dialog (the edit dialog carries a
    /// delete action alongside save).
    pub fn delete_callback(&mut self, id: EventId) -> Result<(), DemoError> {
        let Some(open) = &mut self.current else {
            return Ok(());
        };
        if !matches!(open.modal, Some(Modal::EditEvent(_))) {
            return Ok(());
        }
        open.modal = None;
        open.store.delete(&mut open.demo, id)
    }

    pub fn cancel_event_dialog(&mut self) {
        let Some(open) = &mut self.current else { return };
        if matches!(open.modal, Some(Modal::EditEvent(_))) {
            open.modal = None;
        }
    }

    pub fn delete_dialog_open(&mut self) {
        let Some(open) = &mut self.current else { return };
        if open.modal.is_some() {
            return;
        }
        open.modal = Some(Modal::ConfirmDelete);
    }

    pub fn delete_dialog_close(&mut self) {
        let Some(open) = &mut self.current else { return };
        if matches!(open.modal, Some(Modal::ConfirmDelete)) {
            open.modal = None;
        }
    }

    /// Confirms demo deletion: asks the collaborator to remove the file,
    /// then closes the session. The session ends up closed with no held
    /// demo even when the collaborator reports a failure.
    pub fn delete_dialog_confirm(&mut self) -> Result<(), DemoError> {
        match self.current.take() {
            Some(mut open) if matches!(open.modal, Some(Modal::ConfirmDelete)) => {
                let name = open.demo.short_name();
                let result = open.demo.delete();
                match &result {
                    Ok(()) => info!(demo = %name, "deleted demo and closed session"),
                    Err(err) => {
                        warn!(demo = %name, error = %err, "demo delete failed; session closed anyway");
                    }
                }
                result
            }
            other => {
                self.current = other;
                Ok(())
            }
        }
    }

    pub fn rename_dialog_open(&mut self) {
        let Some(open) = &mut self.current else { return };
        if open.modal.is_some() {
            return;
        }
        open.modal = Some(Modal::ConfirmRename);
    }

    pub fn rename_dialog_close(&mut self) {
        let Some(open) = &mut self.current else { return };
        if matches!(open.modal, Some(Modal::ConfirmRename)) {
            open.modal = None;
        }
    }

    /// Confirms a rename: the demo is renamed in place and stays open; the
    /// event collection and its identifier counter are untouched.
    pub fn rename_dialog_confirm(&mut self, new_name: &str) -> Result<(), DemoError> {
        let Some(open) = &mut self.current else {
            return Ok(());
        };
        if !matches!(open.modal, Some(Modal::ConfirmRename)) {
            return Ok(());
        }
        open.modal = None;
        let old_name = open.demo.short_name();
        open.demo.rename(new_name)?;
        info!(from = %old_name, to = %new_name, "renamed demo");
        Ok(())
    }
}

impl<D: Demo> Default for DemoSession<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
