mod inert;
mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};
use std::collections::HashSet;
use std::path::Path;

use crate::models::*;

pub(crate) use inert::InertStore;

/// Every storage operation the rest of the app is allowed to use. Both
/// backends honour the same contract so callers never branch on which one
/// is active.
///
/// `init` must complete before any other call. Reads return whole
/// collections; writes are single statements whose result only signals
/// success, so callers re-list to see the new state. Updating or deleting an
/// id that does not exist affects zero rows and is not an error.
pub(crate) trait Store {
    /// Bring the schema up to date. Safe to call repeatedly.
    fn init(&mut self) -> Result<()>;
    fn is_ready(&self) -> bool;

    fn list_entries(&self, kind: EntryKind) -> Result<Vec<Entry>>;
    fn insert_entry(&self, kind: EntryKind, entry: &NewEntry) -> Result<WriteResult>;
    fn update_entry(&self, kind: EntryKind, entry: &Entry) -> Result<WriteResult>;
    fn delete_entry_by_id(&self, kind: EntryKind, id: i64) -> Result<WriteResult>;

    fn list_notes(&self) -> Result<Vec<Note>>;
    fn insert_note(&self, note: &NewNote) -> Result<WriteResult>;
    fn update_note(&self, note: &NoteUpdate) -> Result<WriteResult>;
    fn delete_note_by_id(&self, id: i64) -> Result<WriteResult>;

    // ── Expenses ──────────────────────────────────────────────

    fn list_expenses(&self) -> Result<Vec<Entry>> {
        self.list_entries(EntryKind::Expense)
    }

    fn insert_expense(&self, entry: &NewEntry) -> Result<WriteResult> {
        self.insert_entry(EntryKind::Expense, entry)
    }

    fn update_expense(&self, entry: &Entry) -> Result<WriteResult> {
        self.update_entry(EntryKind::Expense, entry)
    }

    fn delete_expense_by_id(&self, id: i64) -> Result<WriteResult> {
        self.delete_entry_by_id(EntryKind::Expense, id)
    }

    // ── Incomes ───────────────────────────────────────────────

    fn list_incomes(&self) -> Result<Vec<Entry>> {
        self.list_entries(EntryKind::Income)
    }

    fn insert_income(&self, entry: &NewEntry) -> Result<WriteResult> {
        self.insert_entry(EntryKind::Income, entry)
    }

    fn update_income(&self, entry: &Entry) -> Result<WriteResult> {
        self.update_entry(EntryKind::Income, entry)
    }

    fn delete_income_by_id(&self, id: i64) -> Result<WriteResult> {
        self.delete_entry_by_id(EntryKind::Income, id)
    }
}

/// SQLite-backed store. One owned connection, created once and passed
/// explicitly to whoever needs it.
pub(crate) struct Database {
    conn: Connection,
    ready: bool,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        tracing::debug!(path = %path.display(), "Opened database");
        Ok(Self { conn, ready: false })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn, ready: false })
    }

    /// Run every migration in `migrations` that is not yet recorded, in
    /// order. A failing migration is logged and left unrecorded so the next
    /// run tries it again; it does not stop the ones after it.
    ///
    /// Returns the number of migrations applied by this call.
    pub(crate) fn run_migrations(&mut self, migrations: &[schema::Migration]) -> Result<usize> {
        self.conn
            .execute_batch(schema::MIGRATIONS_TABLE)
            .context("Failed to create migrations table")?;

        let applied: HashSet<String> = self.applied_migrations()?.into_iter().collect();
        let mut count = 0;

        for migration in migrations {
            if applied.contains(migration.name) {
                tracing::debug!(migration = migration.name, "Migration already applied");
                continue;
            }
            match self.conn.execute_batch(migration.sql) {
                Ok(()) => {
                    self.conn
                        .execute(
                            "INSERT INTO migrations (name) VALUES (?1)",
                            params![migration.name],
                        )
                        .with_context(|| {
                            format!("Failed to record migration {}", migration.name)
                        })?;
                    tracing::info!(migration = migration.name, "Applied migration");
                    count += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        migration = migration.name,
                        error = %e,
                        "Migration failed, will retry on next init"
                    );
                }
            }
        }

        Ok(count)
    }

    /// Names of applied migrations, oldest first.
    pub(crate) fn applied_migrations(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT name FROM migrations ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn write_result(&self, rows_affected: usize) -> WriteResult {
        WriteResult {
            rows_affected,
            last_insert_id: None,
        }
    }
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        reason: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        amount: row.get::<_, Option<f64>>(2)?.unwrap_or_default(),
        date: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        content: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        pinned: row.get::<_, Option<i64>>(3)?.unwrap_or_default() != 0,
        created_at: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        updated_at: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
    })
}

impl Store for Database {
    fn init(&mut self) -> Result<()> {
        let applied = self
            .run_migrations(schema::MIGRATIONS)
            .context("Database migration failed")?;
        tracing::debug!(applied, "Database initialized");
        self.ready = true;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    // ── Entries ───────────────────────────────────────────────

    fn list_entries(&self, kind: EntryKind) -> Result<Vec<Entry>> {
        let sql = format!(
            "SELECT id, reason, amount, date FROM {} ORDER BY date DESC",
            kind.table()
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .with_context(|| format!("Failed to read {}", kind.table()))?;
        let rows = stmt.query_map([], entry_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn insert_entry(&self, kind: EntryKind, entry: &NewEntry) -> Result<WriteResult> {
        let sql = format!(
            "INSERT INTO {} (reason, amount, date) VALUES (?1, ?2, ?3)",
            kind.table()
        );
        let rows = self
            .conn
            .execute(&sql, params![entry.reason, entry.amount, entry.date])
            .with_context(|| format!("Failed to insert {kind}"))?;
        Ok(WriteResult {
            rows_affected: rows,
            last_insert_id: Some(self.conn.last_insert_rowid()),
        })
    }

    fn update_entry(&self, kind: EntryKind, entry: &Entry) -> Result<WriteResult> {
        let sql = format!(
            "UPDATE {} SET reason = ?1, amount = ?2, date = ?3 WHERE id = ?4",
            kind.table()
        );
        let rows = self
            .conn
            .execute(
                &sql,
                params![entry.reason, entry.amount, entry.date, entry.id],
            )
            .with_context(|| format!("Failed to update {kind} {}", entry.id))?;
        Ok(self.write_result(rows))
    }

    fn delete_entry_by_id(&self, kind: EntryKind, id: i64) -> Result<WriteResult> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", kind.table());
        let rows = self
            .conn
            .execute(&sql, params![id])
            .with_context(|| format!("Failed to delete {kind} {id}"))?;
        Ok(self.write_result(rows))
    }

    // ── Notes ─────────────────────────────────────────────────

    fn list_notes(&self) -> Result<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, title, content, pinned, createdAt, updatedAt FROM notes
                 ORDER BY pinned DESC, datetime(updatedAt) DESC, datetime(createdAt) DESC",
            )
            .context("Failed to read notes")?;
        let rows = stmt.query_map([], note_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn insert_note(&self, note: &NewNote) -> Result<WriteResult> {
        let rows = self
            .conn
            .execute(
                "INSERT INTO notes (title, content, pinned, createdAt, updatedAt)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    note.title,
                    note.content,
                    note.pinned,
                    note.created_at,
                    note.updated_at,
                ],
            )
            .context("Failed to insert note")?;
        Ok(WriteResult {
            rows_affected: rows,
            last_insert_id: Some(self.conn.last_insert_rowid()),
        })
    }

    fn update_note(&self, note: &NoteUpdate) -> Result<WriteResult> {
        let rows = self
            .conn
            .execute(
                "UPDATE notes SET title = ?1, content = ?2, pinned = ?3, updatedAt = ?4
                 WHERE id = ?5",
                params![note.title, note.content, note.pinned, note.updated_at, note.id],
            )
            .with_context(|| format!("Failed to update note {}", note.id))?;
        Ok(self.write_result(rows))
    }

    fn delete_note_by_id(&self, id: i64) -> Result<WriteResult> {
        let rows = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id])
            .with_context(|| format!("Failed to delete note {id}"))?;
        Ok(self.write_result(rows))
    }
}

#[cfg(test)]
mod tests;
