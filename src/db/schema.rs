/// A named, forward-only schema change. Once its name is recorded in the
/// `migrations` table it is never run again.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Migration {
    pub(crate) name: &'static str,
    pub(crate) sql: &'static str,
}

pub(crate) const MIGRATIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS migrations (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE
);
"#;

/// Applied in declaration order. Append only: never reorder, rename or remove
/// an entry that has shipped.
pub(crate) const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "create_expenses",
        sql: r#"
CREATE TABLE IF NOT EXISTS expenses (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    reason TEXT,
    amount REAL,
    date   TEXT
);
"#,
    },
    Migration {
        name: "create_incomes",
        sql: r#"
CREATE TABLE IF NOT EXISTS incomes (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    reason TEXT,
    amount REAL,
    date   TEXT
);
"#,
    },
    // Notes started without pin or edit tracking; those columns come next.
    Migration {
        name: "create_notes",
        sql: r#"
CREATE TABLE IF NOT EXISTS notes (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    title     TEXT,
    content   TEXT,
    createdAt TEXT
);
"#,
    },
    Migration {
        name: "notes_add_pinned",
        sql: "ALTER TABLE notes ADD COLUMN pinned INTEGER DEFAULT 0;",
    },
    Migration {
        name: "notes_add_updated_at",
        sql: "ALTER TABLE notes ADD COLUMN updatedAt TEXT;",
    },
];
