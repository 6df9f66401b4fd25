mod entry;
mod note;

pub use entry::{Entry, EntryKind, NewEntry};
pub use note::{NewNote, Note, NoteUpdate};

use chrono::{SecondsFormat, Utc};

/// Result of a mutating store call. Carries no business meaning; callers
/// re-list to observe the new state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteResult {
    pub rows_affected: usize,
    pub last_insert_id: Option<i64>,
}

impl WriteResult {
    /// Success marker returned by backends that store nothing.
    pub fn inert() -> Self {
        Self::default()
    }
}

/// Current UTC instant as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
