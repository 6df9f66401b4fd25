use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::PathBuf;

use crate::db::{Database, InertStore, Store};

/// Storage backend, fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum Backend {
    /// SQLite file on disk
    #[default]
    Sqlite,
    /// Stores nothing; for hosts without embedded SQL
    Inert,
}

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub backend: Backend,
    pub db_path: PathBuf,
}

impl Config {
    /// Build from command-line values. Without `--db` the database lives in
    /// the platform data directory.
    pub(crate) fn new(backend: Backend, db: Option<PathBuf>) -> Result<Self> {
        let db_path = match db {
            Some(path) => path,
            None if backend == Backend::Inert => PathBuf::new(),
            None => default_db_path()?,
        };
        Ok(Self { backend, db_path })
    }

    /// Open the configured backend. The store still needs `init`.
    pub(crate) fn open_store(&self) -> Result<Box<dyn Store>> {
        match self.backend {
            Backend::Sqlite => Ok(Box::new(Database::open(&self.db_path)?)),
            Backend::Inert => Ok(Box::new(InertStore::new())),
        }
    }
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "dailyledger", "DailyLedger")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("dailyledger.db"))
}
