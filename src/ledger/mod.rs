mod format;
mod report;

pub(crate) use format::{format_amount, format_timestamp, truncate};
pub(crate) use report::reason_report;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::db::Store;
use crate::models::{Entry, EntryKind};

/// One row of the combined income/expense ledger.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LedgerItem {
    pub kind: EntryKind,
    pub entry: Entry,
}

/// Merge both collections into one list, newest first. Rows whose date
/// cannot be parsed sort last.
pub(crate) fn combine(incomes: Vec<Entry>, expenses: Vec<Entry>) -> Vec<LedgerItem> {
    let mut items: Vec<LedgerItem> = incomes
        .into_iter()
        .map(|entry| LedgerItem {
            kind: EntryKind::Income,
            entry,
        })
        .chain(expenses.into_iter().map(|entry| LedgerItem {
            kind: EntryKind::Expense,
            entry,
        }))
        .collect();
    items.sort_by(|a, b| {
        let a_ts = parse_timestamp(&a.entry.date);
        let b_ts = parse_timestamp(&b.entry.date);
        b_ts.cmp(&a_ts)
    });
    items
}

/// Re-read both collections from the store and combine them.
pub(crate) fn load(store: &dyn Store) -> Result<Vec<LedgerItem>> {
    let incomes = store.list_incomes()?;
    let expenses = store.list_expenses()?;
    Ok(combine(incomes, expenses))
}

/// Delete every item in `items` from its own collection. Returns how many
/// rows were actually removed.
pub(crate) fn delete_items(store: &dyn Store, items: &[LedgerItem]) -> Result<usize> {
    let mut removed = 0;
    for item in items {
        let id = item.entry.id;
        let result = match item.kind {
            EntryKind::Expense => store.delete_expense_by_id(id),
            EntryKind::Income => store.delete_income_by_id(id),
        };
        removed += result
            .with_context(|| format!("Failed to delete {} {id}", item.kind))?
            .rows_affected;
    }
    Ok(removed)
}

/// Parse a stored timestamp. Accepts RFC 3339 (with `Z` or an offset), a
/// naive `YYYY-MM-DDTHH:MM:SS[.fff]` taken as UTC, or a bare date.
pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A view over the ledger. Day and month membership use the UTC calendar
/// date of each timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Period {
    Day(NaiveDate),
    Month { year: i32, month: u32 },
    All,
}

impl Period {
    pub(crate) fn today() -> Self {
        Self::Day(Utc::now().date_naive())
    }

    pub(crate) fn current_month() -> Self {
        let now = Utc::now();
        Self::Month {
            year: now.year(),
            month: now.month(),
        }
    }

    /// Parse `YYYY-MM-DD`.
    pub(crate) fn parse_day(s: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid day '{s}', expected YYYY-MM-DD"))?;
        Ok(Self::Day(date))
    }

    /// Parse `YYYY-MM`.
    pub(crate) fn parse_month(s: &str) -> Result<Self> {
        let first = format!("{}-01", s.trim());
        let date = NaiveDate::parse_from_str(&first, "%Y-%m-%d")
            .with_context(|| format!("Invalid month '{s}', expected YYYY-MM"))?;
        Ok(Self::Month {
            year: date.year(),
            month: date.month(),
        })
    }

    pub(crate) fn contains(&self, date: &str) -> bool {
        match self {
            Self::All => true,
            Self::Day(day) => parse_timestamp(date).is_some_and(|ts| ts.date_naive() == *day),
            Self::Month { year, month } => parse_timestamp(date)
                .is_some_and(|ts| ts.year() == *year && ts.month() == *month),
        }
    }

    pub(crate) fn filter<'a>(
        &self,
        items: impl IntoIterator<Item = &'a LedgerItem>,
    ) -> Vec<LedgerItem> {
        items
            .into_iter()
            .filter(|item| self.contains(&item.entry.date))
            .cloned()
            .collect()
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day(day) => write!(f, "{}", day.format("%Y-%m-%d")),
            Self::Month { year, month } => write!(f, "{year:04}-{month:02}"),
            Self::All => write!(f, "all time"),
        }
    }
}

/// Income, expense and balance over a set of ledger items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Summary {
    pub(crate) fn of(items: &[LedgerItem]) -> Self {
        items.iter().fold(Self::default(), |mut acc, item| {
            let amount = item.entry.decimal_amount();
            match item.kind {
                EntryKind::Income => acc.income += amount,
                EntryKind::Expense => acc.expense += amount,
            }
            acc
        })
    }

    pub(crate) fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}
