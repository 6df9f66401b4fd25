use chrono::TimeZone;
use rust_decimal::{Decimal, RoundingStrategy};

use super::parse_timestamp;

/// Taka with thousand separators, rounded half away from zero to paisa.
/// e.g. `1234567.891` → `"৳1,234,567.89"`, `-0.005` → `"-৳0.01"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let rounded = val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let paisa = (rounded.abs().fract() * Decimal::ONE_HUNDRED).trunc().to_string();
    let taka = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(taka.len() + taka.len() / 3);
    for (i, digit) in taka.chars().enumerate() {
        if i > 0 && (taka.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}৳{grouped}.{paisa:0>2}")
}

/// Render a stored timestamp as `YYYY-MM-DD HH:MM` in `tz`. Input that does
/// not parse is returned as-is.
pub(crate) fn format_timestamp<Tz>(date: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match parse_timestamp(date) {
        Some(ts) => ts.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string(),
        None => date.to_string(),
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}
