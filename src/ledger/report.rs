use rust_decimal::Decimal;
use std::collections::HashMap;

use super::Period;
use crate::models::Entry;

/// Total for one reason within a report period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReasonTotal {
    pub reason: String,
    pub amount: Decimal,
}

impl ReasonTotal {
    /// Percentage of `total`, one decimal place. Zero when `total` is zero.
    pub(crate) fn share(&self, total: Decimal) -> Decimal {
        if total.is_zero() {
            return Decimal::ZERO;
        }
        (self.amount / total * Decimal::ONE_HUNDRED).round_dp(1)
    }
}

/// Group `entries` inside `period` by exact reason and sum each group.
/// Groups keep the order in which their reason first appears.
pub(crate) fn reason_report(entries: &[Entry], period: &Period) -> Vec<ReasonTotal> {
    let mut totals: Vec<ReasonTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries.iter().filter(|e| period.contains(&e.date)) {
        let amount = entry.decimal_amount();
        match index.get(entry.reason.as_str()) {
            Some(&i) => totals[i].amount += amount,
            None => {
                index.insert(entry.reason.as_str(), totals.len());
                totals.push(ReasonTotal {
                    reason: entry.reason.clone(),
                    amount,
                });
            }
        }
    }

    totals
}
