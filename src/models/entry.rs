use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Which ledger collection an entry belongs to. Expenses and incomes share
/// one row shape and differ only by table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Expense,
    Income,
}

impl EntryKind {
    pub fn table(&self) -> &'static str {
        match self {
            Self::Expense => "expenses",
            Self::Income => "incomes",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    pub fn all() -> &'static [EntryKind] {
        &[Self::Expense, Self::Income]
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored expense or income row.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: i64,
    pub reason: String,
    pub amount: f64,
    /// ISO-8601 timestamp, e.g. `2024-01-15T10:00:00.000Z`
    pub date: String,
}

impl Entry {
    /// Amount as a decimal for exact summing. Values `Decimal` cannot hold
    /// (NaN, infinities, magnitudes past ~7.9e28) count as zero with a warning.
    pub fn decimal_amount(&self) -> Decimal {
        to_decimal(self.amount)
    }
}

/// Fields accepted when creating an expense or income.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub reason: String,
    pub amount: f64,
    pub date: String,
}

impl NewEntry {
    pub fn new(reason: impl Into<String>, amount: f64, date: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            amount,
            date: date.into(),
        }
    }

    pub fn decimal_amount(&self) -> Decimal {
        to_decimal(self.amount)
    }

    pub fn into_entry(self, id: i64) -> Entry {
        Entry {
            id,
            reason: self.reason,
            amount: self.amount,
            date: self.date,
        }
    }
}

fn to_decimal(amount: f64) -> Decimal {
    Decimal::from_f64(amount).unwrap_or_else(|| {
        tracing::warn!(amount, "Amount out of decimal range, counted as zero");
        Decimal::ZERO
    })
}
