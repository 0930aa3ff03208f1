//! Plain-text rendering of the matrix and the budget bar.

use crate::{
    core::services::{budget_service::MAX_DISPLAY_RATIO, BudgetProgress, QuadrantView},
    currency::{truncate, CurrencyStyle},
    domain::{Item, ItemId, MonthKey},
};

const SHORT_ID_LEN: usize = 8;
/// Cells drawn for a ratio of 1.0; over-budget bars run past it.
const BAR_WIDTH: usize = 20;

pub fn short_id(id: &ItemId) -> &str {
    let raw = id.as_str();
    match raw.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &raw[..end],
        None => raw,
    }
}

pub fn item_line(item: &Item, style: &CurrencyStyle) -> String {
    let mark = if item.selected { 'x' } else { ' ' };
    format!(
        "  [{}] {:<width$}  {}  {}",
        mark,
        short_id(&item.id),
        item.name,
        style.format_with_suffix(price_i64(item.price)),
        width = SHORT_ID_LEN
    )
}

/// Every quadrant in matrix order with its rows, price descending.
pub fn matrix_lines(view: &QuadrantView, style: &CurrencyStyle) -> Vec<String> {
    let mut lines = Vec::new();
    for (quad, items) in view.iter() {
        lines.push(format!("{} [{}] ({})", quad.label(), quad.tag(), items.len()));
        if items.is_empty() {
            lines.push("  (empty)".to_string());
        }
        lines.extend(items.iter().map(|item| item_line(item, style)));
    }
    lines
}

pub fn budget_bar(progress: &BudgetProgress) -> String {
    let max_cells = truncate(BAR_WIDTH as f64 * MAX_DISPLAY_RATIO).max(0) as usize;
    let filled = truncate(progress.ratio * BAR_WIDTH as f64).clamp(0, max_cells as i64) as usize;
    let mut bar = String::with_capacity(max_cells + 2);
    for cell in 0..max_cells {
        bar.push(match (cell < filled, cell < BAR_WIDTH) {
            (true, _) => '#',
            (false, true) => '.',
            (false, false) => ' ',
        });
    }
    format!("[{}] {}%", bar, progress.percent_display())
}

pub fn budget_summary(progress: &BudgetProgress, style: &CurrencyStyle) -> String {
    let budget = progress
        .budget
        .map(|value| style.format_with_suffix(price_i64(value)))
        .unwrap_or_else(|| "not set".to_string());
    format!(
        "Selected {} / Budget {} / Remaining {}",
        style.format_with_suffix(price_i64(progress.selected_sum)),
        budget,
        style.format_with_suffix(progress.remain_display())
    )
}

pub fn month_line(
    month: &MonthKey,
    items: usize,
    budget: Option<u64>,
    current: bool,
    style: &CurrencyStyle,
) -> String {
    let marker = if current { '*' } else { ' ' };
    let budget = budget
        .map(|value| style.format_with_suffix(price_i64(value)))
        .unwrap_or_else(|| "-".to_string());
    format!("{} {}  {:>3} wish(es)  budget {}", marker, month, items, budget)
}

fn price_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
