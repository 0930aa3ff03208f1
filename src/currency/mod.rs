//! Free-form integer parsing and thousands-separated amount rendering.

use serde::{Deserialize, Serialize};

/// How whole-yen amounts are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyStyle {
    pub grouping_separator: char,
    pub suffix: String,
}

impl Default for CurrencyStyle {
    fn default() -> Self {
        Self {
            grouping_separator: ',',
            suffix: "円".into(),
        }
    }
}

impl CurrencyStyle {
    /// Grouped digits only, e.g. `12,345`.
    pub fn format(&self, amount: i64) -> String {
        format_amount(amount, self.grouping_separator)
    }

    /// Grouped digits followed by the currency suffix, e.g. `12,345円`.
    pub fn format_with_suffix(&self, amount: i64) -> String {
        format!("{}{}", self.format(amount), self.suffix)
    }
}

/// Parses the leading integer of free-form text.
///
/// Every character except ASCII digits and `-` is discarded first, so `"¥12,000"`
/// reads as `12000`. What remains must start with an optional single `-` followed
/// by at least one digit; parsing stops at the first non-digit after that.
pub fn parse_int(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    let (negative, rest) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let magnitude: i64 = digits.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Truncates a derived value toward zero before it is formatted.
pub fn truncate(value: f64) -> i64 {
    if value.is_finite() {
        value.trunc() as i64
    } else {
        0
    }
}

/// Renders an integer with a separator between every group of three digits.
pub fn format_amount(amount: i64, separator: char) -> String {
    let digits = amount.unsigned_abs().to_string();
    let grouped = group_digits(&digits, separator);
    if amount < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// [`format_amount`] with the default `,` separator.
pub fn format_yen(amount: i64) -> String {
    format_amount(amount, ',')
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped.chars().rev().collect()
}
