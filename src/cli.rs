//! Command-line definitions. The command implementations live in `run`.

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Backend;
use crate::models::EntryKind;

/// dailyledger - track daily income, expenses and notes
#[derive(Parser, Debug)]
#[command(name = "dailyledger")]
#[command(about = "Local-only daily income, expense and notes tracker", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    /// Database path (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Storage backend
    #[arg(long, value_enum, default_value_t = Backend::Sqlite, global = true)]
    pub backend: Backend,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Kind {
    Expense,
    Income,
}

impl From<Kind> for EntryKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Expense => EntryKind::Expense,
            Kind::Income => EntryKind::Income,
        }
    }
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Record an expense or income
    Add {
        kind: Kind,
        reason: String,
        amount: String,
        /// ISO-8601 date or timestamp (default: now)
        #[arg(long)]
        date: Option<String>,
    },

    /// Change an existing expense or income
    Edit {
        kind: Kind,
        id: i64,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete an expense or income
    Delete { kind: Kind, id: i64 },

    /// Show the ledger with totals (default: all time)
    #[command(group(ArgGroup::new("period").args(["today", "day", "month"])))]
    List {
        #[arg(long)]
        today: bool,
        /// YYYY-MM-DD
        #[arg(long)]
        day: Option<String>,
        /// YYYY-MM
        #[arg(long)]
        month: Option<String>,
    },

    /// Delete every entry in a day, a month, or everything
    #[command(group(ArgGroup::new("period").args(["day", "month", "all"]).required(true)))]
    Clear {
        /// YYYY-MM-DD
        #[arg(long)]
        day: Option<String>,
        /// YYYY-MM
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        all: bool,
        /// Actually delete; without it only the count is shown
        #[arg(long)]
        yes: bool,
    },

    /// Per-reason totals for a month (default: current month)
    Report {
        /// YYYY-MM
        month: Option<String>,
    },

    /// List notes, pinned first
    Notes,

    /// Manage notes
    Note {
        #[command(subcommand)]
        action: NoteCommand,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum NoteCommand {
    /// Create a note
    Add {
        title: String,
        content: String,
        #[arg(long)]
        pin: bool,
    },
    /// Change a note's title or content
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Pin a note to the top
    Pin { id: i64 },
    /// Unpin a note
    Unpin { id: i64 },
    /// Delete a note
    Delete { id: i64 },
}
