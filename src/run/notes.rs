use anyhow::Result;
use chrono::Local;
use std::io::Write;

use crate::db::Store;
use crate::ledger::{format_timestamp, truncate};
use crate::models::{NewNote, Note, NoteUpdate};

pub(super) fn list(store: &dyn Store, out: &mut dyn Write) -> Result<()> {
    let notes = store.list_notes()?;
    if notes.is_empty() {
        writeln!(out, "No notes")?;
        return Ok(());
    }

    writeln!(out, "{:<5} {:<1} {:<24} {:<16} Content", "ID", "", "Title", "Updated")?;
    writeln!(out, "{}", "─".repeat(72))?;
    for note in &notes {
        let touched = if note.updated_at.is_empty() {
            &note.created_at
        } else {
            &note.updated_at
        };
        writeln!(
            out,
            "{:<5} {:<1} {:<24} {:<16} {}",
            note.id,
            if note.pinned { "*" } else { "" },
            truncate(&note.title, 24),
            format_timestamp(touched, &Local),
            truncate(&note.content.replace('\n', " "), 40),
        )?;
    }
    Ok(())
}

fn find(store: &dyn Store, id: i64) -> Result<Note> {
    store
        .list_notes()?
        .into_iter()
        .find(|n| n.id == id)
        .ok_or_else(|| anyhow::anyhow!("No note with id {id}"))
}

pub(super) fn add(
    store: &dyn Store,
    out: &mut dyn Write,
    title: String,
    content: String,
    pin: bool,
) -> Result<()> {
    let note = NewNote::now(title, content, pin);
    store.insert_note(&note)?;
    writeln!(out, "Added note: {}", note.title)?;
    Ok(())
}

pub(super) fn edit(
    store: &dyn Store,
    out: &mut dyn Write,
    id: i64,
    title: Option<String>,
    content: Option<String>,
) -> Result<()> {
    let mut update = NoteUpdate::touch(&find(store, id)?);
    if let Some(title) = title {
        update.title = title;
    }
    if let Some(content) = content {
        update.content = content;
    }
    store.update_note(&update)?;
    writeln!(out, "Updated note {id}")?;
    Ok(())
}

pub(super) fn set_pinned(
    store: &dyn Store,
    out: &mut dyn Write,
    id: i64,
    pinned: bool,
) -> Result<()> {
    let update = NoteUpdate {
        pinned,
        ..NoteUpdate::touch(&find(store, id)?)
    };
    store.update_note(&update)?;
    writeln!(
        out,
        "{} note {id}",
        if pinned { "Pinned" } else { "Unpinned" }
    )?;
    Ok(())
}

pub(super) fn delete(store: &dyn Store, out: &mut dyn Write, id: i64) -> Result<()> {
    let result = store.delete_note_by_id(id)?;
    if result.rows_affected == 0 {
        writeln!(out, "No note with id {id}")?;
    } else {
        writeln!(out, "Deleted note {id}")?;
    }
    Ok(())
}
