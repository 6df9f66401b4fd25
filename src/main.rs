mod cli;
mod config;
mod db;
mod ledger;
mod models;
mod run;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG > --verbose > warn
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let config = config::Config::new(cli.backend, cli.db)?;
    let mut store = config.open_store()?;
    store.init().context("Failed to initialize storage")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run::as_cli(cli.command, store.as_ref(), &mut out)
}
