#![allow(clippy::unwrap_used)]

use super::*;
use rusqlite::Connection;
use tempfile::TempDir;

fn ready_db() -> Database {
    let mut db = Database::open_in_memory().unwrap();
    db.init().unwrap();
    db
}

fn table_names(db: &Database) -> Vec<String> {
    let mut stmt = db
        .conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
        .unwrap();
    let rows = stmt.query_map([], |row| row.get::<_, String>(0)).unwrap();
    rows.collect::<std::result::Result<Vec<_>, _>>().unwrap()
}

fn note_columns(db: &Database) -> Vec<String> {
    let mut stmt = db.conn.prepare("PRAGMA table_info(notes)").unwrap();
    let rows = stmt.query_map([], |row| row.get::<_, String>(1)).unwrap();
    rows.collect::<std::result::Result<Vec<_>, _>>().unwrap()
}

// ── Schema lifecycle ──────────────────────────────────────────

#[test]
fn test_open_starts_uninitialized() {
    let db = Database::open_in_memory().unwrap();
    assert!(!db.is_ready());
}

#[test]
fn test_first_init_creates_schema() {
    let db = ready_db();
    assert!(db.is_ready());
    assert_eq!(
        table_names(&db),
        vec!["expenses", "incomes", "migrations", "notes"]
    );
    let columns = note_columns(&db);
    assert_eq!(
        columns,
        vec!["id", "title", "content", "createdAt", "pinned", "updatedAt"]
    );
    assert_eq!(
        db.applied_migrations().unwrap(),
        vec![
            "create_expenses",
            "create_incomes",
            "create_notes",
            "notes_add_pinned",
            "notes_add_updated_at",
        ]
    );
}

#[test]
fn test_init_is_idempotent() {
    let mut db = ready_db();
    let tables_before = table_names(&db);
    let applied_before = db.applied_migrations().unwrap();

    db.init().unwrap();
    db.init().unwrap();

    assert_eq!(table_names(&db), tables_before);
    assert_eq!(db.applied_migrations().unwrap(), applied_before);
    assert_eq!(note_columns(&db).len(), 6);
}

#[test]
fn test_rerun_applies_nothing() {
    let mut db = ready_db();
    assert_eq!(db.run_migrations(schema::MIGRATIONS).unwrap(), 0);
}

#[test]
fn test_appended_migration_runs_alone() {
    let mut db = ready_db();
    let before = db.applied_migrations().unwrap().len();

    let mut migrations = schema::MIGRATIONS.to_vec();
    migrations.push(schema::Migration {
        name: "expenses_add_note",
        sql: "ALTER TABLE expenses ADD COLUMN note TEXT;",
    });

    assert_eq!(db.run_migrations(&migrations).unwrap(), 1);
    let applied = db.applied_migrations().unwrap();
    assert_eq!(applied.len(), before + 1);
    assert_eq!(applied.last().unwrap(), "expenses_add_note");

    // And never again.
    assert_eq!(db.run_migrations(&migrations).unwrap(), 0);
    assert_eq!(db.applied_migrations().unwrap().len(), before + 1);
}

#[test]
fn test_failed_migration_is_not_recorded_and_retried() {
    let mut db = ready_db();
    let mut migrations = schema::MIGRATIONS.to_vec();
    migrations.push(schema::Migration {
        name: "broken",
        sql: "ALTER TABLE no_such_table ADD COLUMN x TEXT;",
    });
    migrations.push(schema::Migration {
        name: "after_broken",
        sql: "CREATE TABLE IF NOT EXISTS scratch (id INTEGER PRIMARY KEY);",
    });

    assert_eq!(db.run_migrations(&migrations).unwrap(), 1);
    let applied = db.applied_migrations().unwrap();
    assert!(!applied.iter().any(|n| n == "broken"));
    assert!(applied.iter().any(|n| n == "after_broken"));

    // Still failing, still unrecorded; nothing else re-runs.
    assert_eq!(db.run_migrations(&migrations).unwrap(), 0);
    assert!(!db.applied_migrations().unwrap().iter().any(|n| n == "broken"));

    // Once the table exists the retry succeeds.
    db.conn
        .execute_batch("CREATE TABLE no_such_table (id INTEGER PRIMARY KEY);")
        .unwrap();
    assert_eq!(db.run_migrations(&migrations).unwrap(), 1);
    assert_eq!(db.applied_migrations().unwrap().last().unwrap(), "broken");
}

#[test]
fn test_legacy_database_upgrades_without_losing_data() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("legacy.db");
    {
        // Schema written by an older build that had no migrations table but
        // already created the notes columns directly.
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE expenses (id INTEGER PRIMARY KEY AUTOINCREMENT, reason TEXT, amount REAL, date TEXT);
             CREATE TABLE incomes (id INTEGER PRIMARY KEY AUTOINCREMENT, reason TEXT, amount REAL, date TEXT);
             CREATE TABLE notes (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT, content TEXT,
                                 pinned INTEGER DEFAULT 0, createdAt TEXT, updatedAt TEXT);
             INSERT INTO expenses (reason, amount, date) VALUES ('rent', 8000, '2023-12-01T00:00:00.000Z');
             INSERT INTO notes (title, content, pinned, createdAt, updatedAt)
                 VALUES ('old', 'kept', 1, '2023-11-01T00:00:00.000Z', '2023-11-02T00:00:00.000Z');",
        )
        .unwrap();
    }

    let mut db = Database::open(&path).unwrap();
    db.init().unwrap();

    // The column additions fail against the legacy table and stay pending.
    assert_eq!(
        db.applied_migrations().unwrap(),
        vec!["create_expenses", "create_incomes", "create_notes"]
    );
    assert!(db.is_ready());

    let expenses = db.list_expenses().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].reason, "rent");
    assert_eq!(expenses[0].amount, 8000.0);

    let notes = db.list_notes().unwrap();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].pinned);
    assert_eq!(notes[0].updated_at, "2023-11-02T00:00:00.000Z");

    db.init().unwrap();
    assert_eq!(db.applied_migrations().unwrap().len(), 3);
}

#[test]
fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.db");
    {
        let mut db = Database::open(&path).unwrap();
        db.init().unwrap();
        db.insert_income(&NewEntry::new("salary", 30000.0, "2024-01-01T09:00:00.000Z"))
            .unwrap();
        db.insert_note(&NewNote::now("todo", "pay rent", false)).unwrap();
    }

    let mut db = Database::open(&path).unwrap();
    db.init().unwrap();
    assert_eq!(db.applied_migrations().unwrap().len(), 5);
    let incomes = db.list_incomes().unwrap();
    assert_eq!(incomes.len(), 1);
    assert_eq!(incomes[0].reason, "salary");
    assert_eq!(db.list_notes().unwrap().len(), 1);
}

// ── Expenses ──────────────────────────────────────────────────

#[test]
fn test_empty_lists() {
    let db = ready_db();
    assert!(db.list_expenses().unwrap().is_empty());
    assert!(db.list_incomes().unwrap().is_empty());
    assert!(db.list_notes().unwrap().is_empty());
}

#[test]
fn test_expense_lifecycle() {
    let db = ready_db();
    let result = db
        .insert_expense(&NewEntry::new("বাজার", 500.0, "2024-01-15T10:00:00.000Z"))
        .unwrap();
    assert_eq!(result.rows_affected, 1);

    let expenses = db.list_expenses().unwrap();
    assert_eq!(expenses.len(), 1);
    let inserted = &expenses[0];
    assert_eq!(inserted.reason, "বাজার");
    assert_eq!(inserted.amount, 500.0);
    assert_eq!(inserted.date, "2024-01-15T10:00:00.000Z");
    assert_eq!(result.last_insert_id, Some(inserted.id));

    let edited = Entry {
        id: inserted.id,
        reason: "বিল".into(),
        amount: 600.0,
        date: "2024-01-16T00:00:00.000Z".into(),
    };
    assert_eq!(db.update_expense(&edited).unwrap().rows_affected, 1);
    let expenses = db.list_expenses().unwrap();
    assert_eq!(expenses, vec![edited.clone()]);

    assert_eq!(db.delete_expense_by_id(edited.id).unwrap().rows_affected, 1);
    assert!(db.list_expenses().unwrap().is_empty());
}

#[test]
fn test_insert_assigns_unique_ids() {
    let db = ready_db();
    for i in 0..5 {
        db.insert_expense(&NewEntry::new(
            format!("item {i}"),
            10.0,
            format!("2024-01-0{}T00:00:00.000Z", i + 1),
        ))
        .unwrap();
    }
    let mut ids: Vec<i64> = db.list_expenses().unwrap().iter().map(|e| e.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

#[test]
fn test_update_leaves_other_rows_unchanged() {
    let db = ready_db();
    db.insert_expense(&NewEntry::new("tea", 20.0, "2024-01-01T08:00:00.000Z"))
        .unwrap();
    db.insert_expense(&NewEntry::new("bus", 35.5, "2024-01-02T08:00:00.000Z"))
        .unwrap();
    db.insert_expense(&NewEntry::new("lunch", 150.0, "2024-01-03T08:00:00.000Z"))
        .unwrap();

    let before = db.list_expenses().unwrap();
    let target = before.iter().find(|e| e.reason == "bus").unwrap().clone();
    db.update_expense(&Entry {
        amount: 40.0,
        ..target.clone()
    })
    .unwrap();

    let after = db.list_expenses().unwrap();
    for entry in &after {
        if entry.id == target.id {
            assert_eq!(entry.amount, 40.0);
        } else {
            assert!(before.contains(entry));
        }
    }
}

#[test]
fn test_update_missing_id_is_noop() {
    let db = ready_db();
    db.insert_expense(&NewEntry::new("tea", 20.0, "2024-01-01T08:00:00.000Z"))
        .unwrap();
    let before = db.list_expenses().unwrap();
    let result = db
        .update_expense(&Entry {
            id: 99999,
            reason: "ghost".into(),
            amount: 1.0,
            date: "2024-01-01".into(),
        })
        .unwrap();
    assert_eq!(result.rows_affected, 0);
    assert_eq!(db.list_expenses().unwrap(), before);
}

#[test]
fn test_delete_is_idempotent() {
    let db = ready_db();
    db.insert_expense(&NewEntry::new("tea", 20.0, "2024-01-01T08:00:00.000Z"))
        .unwrap();
    let id = db.list_expenses().unwrap()[0].id;

    assert_eq!(db.delete_expense_by_id(id).unwrap().rows_affected, 1);
    assert_eq!(db.delete_expense_by_id(id).unwrap().rows_affected, 0);
    assert!(db.list_expenses().unwrap().is_empty());
}

#[test]
fn test_entries_sorted_by_date_desc() {
    let db = ready_db();
    for date in [
        "2024-01-10T12:00:00.000Z",
        "2024-03-01T00:00:00.000Z",
        "2023-12-31T23:59:59.000Z",
        "2024-01-10T13:00:00.000Z",
    ] {
        db.insert_income(&NewEntry::new("x", 1.0, date)).unwrap();
    }
    let dates: Vec<String> = db
        .list_incomes()
        .unwrap()
        .into_iter()
        .map(|e| e.date)
        .collect();
    assert_eq!(
        dates,
        vec![
            "2024-03-01T00:00:00.000Z",
            "2024-01-10T13:00:00.000Z",
            "2024-01-10T12:00:00.000Z",
            "2023-12-31T23:59:59.000Z",
        ]
    );
}

#[test]
fn test_expenses_and_incomes_are_separate() {
    let db = ready_db();
    db.insert_expense(&NewEntry::new("rent", 8000.0, "2024-01-01T00:00:00.000Z"))
        .unwrap();
    db.insert_income(&NewEntry::new("salary", 30000.0, "2024-01-01T00:00:00.000Z"))
        .unwrap();

    let expenses = db.list_expenses().unwrap();
    let incomes = db.list_incomes().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(incomes.len(), 1);
    assert_eq!(expenses[0].reason, "rent");
    assert_eq!(incomes[0].reason, "salary");

    // Deleting an income id from expenses does nothing to incomes.
    db.delete_expense_by_id(incomes[0].id).unwrap();
    assert_eq!(db.list_incomes().unwrap().len(), 1);
}

#[test]
fn test_income_update() {
    let db = ready_db();
    db.insert_income(&NewEntry::new("gift", 1000.0, "2024-02-14T00:00:00.000Z"))
        .unwrap();
    let mut income = db.list_incomes().unwrap().remove(0);
    income.amount = 1200.0;
    db.update_income(&income).unwrap();
    assert_eq!(db.list_incomes().unwrap()[0].amount, 1200.0);
    db.delete_income_by_id(income.id).unwrap();
    assert!(db.list_incomes().unwrap().is_empty());
}

#[test]
fn test_null_columns_read_as_defaults() {
    let db = ready_db();
    db.conn
        .execute("INSERT INTO expenses (reason, amount, date) VALUES (NULL, NULL, NULL)", [])
        .unwrap();
    let expenses = db.list_expenses().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].reason, "");
    assert_eq!(expenses[0].amount, 0.0);
}

// ── Notes ─────────────────────────────────────────────────────

fn note_at(title: &str, created_at: &str, updated_at: &str, pinned: bool) -> NewNote {
    NewNote {
        title: title.into(),
        content: format!("{title} body"),
        pinned,
        created_at: created_at.into(),
        updated_at: updated_at.into(),
    }
}

#[test]
fn test_note_insert_defaults_unpinned() {
    let db = ready_db();
    db.conn
        .execute(
            "INSERT INTO notes (title, content, createdAt, updatedAt) VALUES ('a', 'b', '2024-01-01T00:00:00.000Z', '2024-01-01T00:00:00.000Z')",
            [],
        )
        .unwrap();
    let notes = db.list_notes().unwrap();
    assert_eq!(notes.len(), 1);
    assert!(!notes[0].pinned);
}

#[test]
fn test_pinned_note_floats_to_top() {
    let db = ready_db();
    db.insert_note(&note_at(
        "first",
        "2024-01-01T00:00:00.000Z",
        "2024-01-01T00:00:00.000Z",
        false,
    ))
    .unwrap();
    db.insert_note(&note_at(
        "second",
        "2024-01-02T00:00:00.000Z",
        "2024-01-02T00:00:00.000Z",
        false,
    ))
    .unwrap();

    // Pin the older one; it must lead even though the other is newer.
    let first = db
        .list_notes()
        .unwrap()
        .into_iter()
        .find(|n| n.title == "first")
        .unwrap();
    db.update_note(&NoteUpdate {
        id: first.id,
        title: first.title.clone(),
        content: first.content.clone(),
        pinned: true,
        updated_at: "2024-01-01T00:00:00.000Z".into(),
    })
    .unwrap();

    let titles: Vec<String> = db.list_notes().unwrap().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["first", "second"]);
}

#[test]
fn test_pin_second_note_after_both_exist() {
    let db = ready_db();
    db.insert_note(&NewNote::now("one", "a", false)).unwrap();
    db.insert_note(&NewNote::now("two", "b", false)).unwrap();

    let two = db
        .list_notes()
        .unwrap()
        .into_iter()
        .find(|n| n.title == "two")
        .unwrap();
    db.update_note(&NoteUpdate {
        pinned: true,
        ..NoteUpdate::touch(&two)
    })
    .unwrap();

    let notes = db.list_notes().unwrap();
    assert_eq!(notes[0].title, "two");
    assert!(notes[0].pinned);
}

#[test]
fn test_notes_sorted_by_pinned_updated_created() {
    let db = ready_db();
    db.insert_note(&note_at(
        "stale",
        "2024-01-01T00:00:00.000Z",
        "2024-01-01T00:00:00.000Z",
        false,
    ))
    .unwrap();
    db.insert_note(&note_at(
        "touched",
        "2023-06-01T00:00:00.000Z",
        "2024-02-01T00:00:00.000Z",
        false,
    ))
    .unwrap();
    db.insert_note(&note_at(
        "pinned",
        "2022-01-01T00:00:00.000Z",
        "2022-01-01T00:00:00.000Z",
        true,
    ))
    .unwrap();
    db.insert_note(&note_at(
        "same-update-newer",
        "2023-12-01T00:00:00.000Z",
        "2024-01-01T00:00:00.000Z",
        false,
    ))
    .unwrap();

    let titles: Vec<String> = db.list_notes().unwrap().into_iter().map(|n| n.title).collect();
    assert_eq!(
        titles,
        vec!["pinned", "touched", "stale", "same-update-newer"]
    );
}

#[test]
fn test_note_update_keeps_created_at() {
    let db = ready_db();
    db.insert_note(&note_at(
        "draft",
        "2024-01-01T00:00:00.000Z",
        "2024-01-01T00:00:00.000Z",
        false,
    ))
    .unwrap();
    let note = db.list_notes().unwrap().remove(0);

    db.update_note(&NoteUpdate {
        id: note.id,
        title: "final".into(),
        content: "done".into(),
        pinned: false,
        updated_at: "2024-03-01T00:00:00.000Z".into(),
    })
    .unwrap();

    let updated = db.list_notes().unwrap().remove(0);
    assert_eq!(updated.title, "final");
    assert_eq!(updated.content, "done");
    assert_eq!(updated.created_at, "2024-01-01T00:00:00.000Z");
    assert_eq!(updated.updated_at, "2024-03-01T00:00:00.000Z");
}

#[test]
fn test_note_delete_missing_is_noop() {
    let db = ready_db();
    db.insert_note(&NewNote::now("keep", "me", false)).unwrap();
    let id = db.list_notes().unwrap()[0].id;
    assert_eq!(db.delete_note_by_id(id + 100).unwrap().rows_affected, 0);
    assert_eq!(db.list_notes().unwrap().len(), 1);
    assert_eq!(db.delete_note_by_id(id).unwrap().rows_affected, 1);
    assert!(db.list_notes().unwrap().is_empty());
}

// ── Inert backend ─────────────────────────────────────────────

#[test]
fn test_inert_store_contract() {
    let mut store = InertStore::new();
    assert!(!store.is_ready());
    store.init().unwrap();
    store.init().unwrap();
    assert!(store.is_ready());

    let entry = NewEntry::new("tea", 20.0, "2024-01-01T08:00:00.000Z");
    assert_eq!(store.insert_expense(&entry).unwrap(), WriteResult::inert());
    assert_eq!(store.insert_income(&entry).unwrap(), WriteResult::inert());
    assert_eq!(
        store.update_expense(&entry.clone().into_entry(1)).unwrap(),
        WriteResult::inert()
    );
    assert_eq!(store.delete_income_by_id(1).unwrap(), WriteResult::inert());
    assert!(store.list_expenses().unwrap().is_empty());
    assert!(store.list_incomes().unwrap().is_empty());

    assert_eq!(
        store.insert_note(&NewNote::now("a", "b", true)).unwrap(),
        WriteResult::inert()
    );
    assert_eq!(store.delete_note_by_id(1).unwrap(), WriteResult::inert());
    assert!(store.list_notes().unwrap().is_empty());
}

#[test]
fn test_backends_are_interchangeable() {
    let stores: Vec<Box<dyn Store>> = vec![
        Box::new(ready_db()) as Box<dyn Store>,
        Box::new(InertStore::new()),
    ];
    for store in &stores {
        store
            .insert_expense(&NewEntry::new("tea", 20.0, "2024-01-01T08:00:00.000Z"))
            .unwrap();
        assert!(store.list_expenses().unwrap().len() <= 1);
    }
}
