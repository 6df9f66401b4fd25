/// A free-form note. `pinned` notes sort ahead of everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub pinned: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub pinned: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl NewNote {
    /// A note created right now. Both timestamps carry the same instant.
    pub fn now(title: impl Into<String>, content: impl Into<String>, pinned: bool) -> Self {
        let stamp = super::timestamp_now();
        Self {
            title: title.into(),
            content: content.into(),
            pinned,
            created_at: stamp.clone(),
            updated_at: stamp,
        }
    }
}

/// Full replacement of a note's mutable fields. `created_at` is not part of
/// an update and never changes after insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteUpdate {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub pinned: bool,
    pub updated_at: String,
}

impl NoteUpdate {
    /// Copy of `note` with `updated_at` set to now.
    pub fn touch(note: &Note) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            pinned: note.pinned,
            updated_at: super::timestamp_now(),
        }
    }
}
