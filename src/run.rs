mod entries;
mod notes;

use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::io::Write;
use std::str::FromStr;

use crate::cli::{Command, NoteCommand};
use crate::db::Store;
use crate::ledger::{parse_timestamp, Period};

/// Run one command against an initialized store, writing output to `out`.
pub(crate) fn as_cli(command: Command, store: &dyn Store, out: &mut dyn Write) -> Result<()> {
    anyhow::ensure!(store.is_ready(), "Storage is not initialized");
    match command {
        Command::Add {
            kind,
            reason,
            amount,
            date,
        } => entries::add(store, out, kind.into(), reason, &amount, date.as_deref()),
        Command::Edit {
            kind,
            id,
            reason,
            amount,
            date,
        } => entries::edit(
            store,
            out,
            kind.into(),
            id,
            reason,
            amount.as_deref(),
            date.as_deref(),
        ),
        Command::Delete { kind, id } => entries::delete(store, out, kind.into(), id),
        Command::List { today, day, month } => {
            let period = if today {
                Period::today()
            } else {
                pick_period(day.as_deref(), month.as_deref())?
            };
            entries::list(store, out, period)
        }
        Command::Clear {
            day,
            month,
            all: _,
            yes,
        } => entries::clear(store, out, pick_period(day.as_deref(), month.as_deref())?, yes),
        Command::Report { month } => {
            let period = match month {
                Some(m) => Period::parse_month(&m)?,
                None => Period::current_month(),
            };
            entries::report(store, out, period)
        }
        Command::Notes => notes::list(store, out),
        Command::Note { action } => match action {
            NoteCommand::Add {
                title,
                content,
                pin,
            } => notes::add(store, out, title, content, pin),
            NoteCommand::Edit { id, title, content } => {
                notes::edit(store, out, id, title, content)
            }
            NoteCommand::Pin { id } => notes::set_pinned(store, out, id, true),
            NoteCommand::Unpin { id } => notes::set_pinned(store, out, id, false),
            NoteCommand::Delete { id } => notes::delete(store, out, id),
        },
    }
}

/// `--day` wins over `--month`; neither means all time.
fn pick_period(day: Option<&str>, month: Option<&str>) -> Result<Period> {
    match (day, month) {
        (Some(d), _) => Period::parse_day(d),
        (None, Some(m)) => Period::parse_month(m),
        (None, None) => Ok(Period::All),
    }
}

/// Parse a user-typed amount into the numeric value that gets stored.
pub(crate) fn parse_amount(s: &str) -> Result<f64> {
    let amount = Decimal::from_str(s.trim()).with_context(|| format!("Invalid amount: {s}"))?;
    if amount.is_sign_negative() {
        anyhow::bail!("Amount cannot be negative: {s}");
    }
    amount
        .to_f64()
        .ok_or_else(|| anyhow::anyhow!("Amount out of range: {s}"))
}

/// Normalise a user-typed date to `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub(crate) fn parse_date(s: &str) -> Result<String> {
    let ts = parse_timestamp(s).ok_or_else(|| anyhow::anyhow!("Invalid date: {s}"))?;
    Ok(ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
}
