use anyhow::Result;

use super::Store;
use crate::models::*;

/// Backend for hosts without embedded SQL. Satisfies the full [`Store`]
/// contract while persisting nothing.
#[derive(Debug, Default)]
pub(crate) struct InertStore {
    ready: bool,
}

impl InertStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl Store for InertStore {
    fn init(&mut self) -> Result<()> {
        tracing::debug!("Storage disabled; using inert store");
        self.ready = true;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn list_entries(&self, _kind: EntryKind) -> Result<Vec<Entry>> {
        Ok(Vec::new())
    }

    fn insert_entry(&self, _kind: EntryKind, _entry: &NewEntry) -> Result<WriteResult> {
        Ok(WriteResult::inert())
    }

    fn update_entry(&self, _kind: EntryKind, _entry: &Entry) -> Result<WriteResult> {
        Ok(WriteResult::inert())
    }

    fn delete_entry_by_id(&self, _kind: EntryKind, _id: i64) -> Result<WriteResult> {
        Ok(WriteResult::inert())
    }

    fn list_notes(&self) -> Result<Vec<Note>> {
        Ok(Vec::new())
    }

    fn insert_note(&self, _note: &NewNote) -> Result<WriteResult> {
        Ok(WriteResult::inert())
    }

    fn update_note(&self, _note: &NoteUpdate) -> Result<WriteResult> {
        Ok(WriteResult::inert())
    }

    fn delete_note_by_id(&self, _id: i64) -> Result<WriteResult> {
        Ok(WriteResult::inert())
    }
}
