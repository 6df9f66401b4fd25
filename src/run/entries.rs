use anyhow::Result;
use chrono::Local;
use rust_decimal::Decimal;
use std::io::Write;

use super::{parse_amount, parse_date};
use crate::db::Store;
use crate::ledger::{self, format_amount, format_timestamp, truncate, Period, Summary};
use crate::models::{timestamp_now, Entry, EntryKind, NewEntry};

pub(super) fn add(
    store: &dyn Store,
    out: &mut dyn Write,
    kind: EntryKind,
    reason: String,
    amount: &str,
    date: Option<&str>,
) -> Result<()> {
    let date = match date {
        Some(d) => parse_date(d)?,
        None => timestamp_now(),
    };
    let entry = NewEntry::new(reason, parse_amount(amount)?, date);
    let result = match kind {
        EntryKind::Expense => store.insert_expense(&entry)?,
        EntryKind::Income => store.insert_income(&entry)?,
    };
    tracing::debug!(%kind, id = ?result.last_insert_id, "Recorded entry");
    writeln!(
        out,
        "Added {kind}: {} {}",
        entry.reason,
        format_amount(entry.decimal_amount())
    )?;
    Ok(())
}

fn find(store: &dyn Store, kind: EntryKind, id: i64) -> Result<Entry> {
    store
        .list_entries(kind)?
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(|| anyhow::anyhow!("No {kind} with id {id}"))
}

pub(super) fn edit(
    store: &dyn Store,
    out: &mut dyn Write,
    kind: EntryKind,
    id: i64,
    reason: Option<String>,
    amount: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let current = find(store, kind, id)?;
    let amount = match amount {
        Some(a) => parse_amount(a)?,
        None => current.amount,
    };
    let date = match date {
        Some(d) => parse_date(d)?,
        None => current.date,
    };
    let updated = NewEntry::new(reason.unwrap_or(current.reason), amount, date).into_entry(id);
    match kind {
        EntryKind::Expense => store.update_expense(&updated)?,
        EntryKind::Income => store.update_income(&updated)?,
    };
    writeln!(
        out,
        "Updated {kind} {id}: {} {}",
        updated.reason,
        format_amount(updated.decimal_amount())
    )?;
    Ok(())
}

pub(super) fn delete(
    store: &dyn Store,
    out: &mut dyn Write,
    kind: EntryKind,
    id: i64,
) -> Result<()> {
    let result = match kind {
        EntryKind::Expense => store.delete_expense_by_id(id)?,
        EntryKind::Income => store.delete_income_by_id(id)?,
    };
    if result.rows_affected == 0 {
        writeln!(out, "No {kind} with id {id}")?;
    } else {
        writeln!(out, "Deleted {kind} {id}")?;
    }
    Ok(())
}

pub(super) fn list(store: &dyn Store, out: &mut dyn Write, period: Period) -> Result<()> {
    let items = period.filter(&ledger::load(store)?);
    let summary = Summary::of(&items);

    writeln!(out, "Ledger: {period}")?;
    writeln!(out, "{}", "─".repeat(64))?;
    if items.is_empty() {
        writeln!(out, "No entries")?;
    } else {
        writeln!(
            out,
            "{:<5} {:<16} {:<8} {:<20} {:>12}",
            "ID", "Date", "Type", "Reason", "Amount"
        )?;
        for item in &items {
            let amount = item.entry.decimal_amount();
            let signed = match item.kind {
                EntryKind::Income => amount,
                EntryKind::Expense => -amount,
            };
            writeln!(
                out,
                "{:<5} {:<16} {:<8} {:<20} {:>12}",
                item.entry.id,
                format_timestamp(&item.entry.date, &Local),
                item.kind,
                truncate(&item.entry.reason, 20),
                format_amount(signed),
            )?;
        }
    }
    writeln!(out, "{}", "─".repeat(64))?;
    write_summary(out, &summary)?;
    Ok(())
}

fn write_summary(out: &mut dyn Write, summary: &Summary) -> Result<()> {
    writeln!(out, "  Income:   {}", format_amount(summary.income))?;
    writeln!(out, "  Expense:  {}", format_amount(summary.expense))?;
    writeln!(out, "  Balance:  {}", format_amount(summary.balance()))?;
    Ok(())
}

pub(super) fn clear(
    store: &dyn Store,
    out: &mut dyn Write,
    period: Period,
    yes: bool,
) -> Result<()> {
    let items = period.filter(&ledger::load(store)?);
    if items.is_empty() {
        writeln!(out, "Nothing to delete for {period}")?;
        return Ok(());
    }
    if !yes {
        writeln!(
            out,
            "Would delete {} entries from {period}. Re-run with --yes to confirm.",
            items.len()
        )?;
        return Ok(());
    }
    let removed = ledger::delete_items(store, &items)?;
    tracing::info!(removed, %period, "Cleared ledger entries");
    writeln!(out, "Deleted {removed} entries from {period}")?;
    Ok(())
}

pub(super) fn report(store: &dyn Store, out: &mut dyn Write, period: Period) -> Result<()> {
    writeln!(out, "Report: {period}")?;
    for &kind in EntryKind::all() {
        let totals = ledger::reason_report(&store.list_entries(kind)?, &period);
        let total: Decimal = totals.iter().map(|t| t.amount).sum();

        writeln!(out)?;
        writeln!(out, "{} by reason ({})", heading(kind), format_amount(total))?;
        if totals.is_empty() {
            writeln!(out, "  No data")?;
            continue;
        }
        for t in &totals {
            writeln!(
                out,
                "  {:<24} {:>14} {:>6}%",
                truncate(&t.reason, 24),
                format_amount(t.amount),
                t.share(total).to_string()
            )?;
        }
    }
    Ok(())
}

fn heading(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Expense => "Expenses",
        EntryKind::Income => "Income",
    }
}
