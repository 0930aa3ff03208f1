//! Selected-sum, remaining/over amount and the clamped budget-bar ratio.

use crate::{
    core::month_store::MonthSnapshot,
    currency::{truncate, CurrencyStyle},
    domain::Item,
};

/// Upper bound of the display ratio; the bar may run past 100% up to here.
pub const MAX_DISPLAY_RATIO: f64 = 1.25;
/// Upper bound of the display percentage.
pub const MAX_DISPLAY_PERCENT: f64 = 125.0;

/// How the selected total compares with the month's budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    /// No budget set; no over/under message.
    Unset,
    Within { remaining: u64 },
    Over { overage: u64 },
}

/// Everything the budget bar and summary line need.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProgress {
    pub selected_sum: u64,
    pub budget: Option<u64>,
    /// `budget - selected_sum`; `None` without a budget.
    pub remain: Option<i64>,
    pub ratio: f64,
    pub percent: f64,
    pub over: bool,
    pub status: BudgetStatus,
}

impl BudgetProgress {
    /// Remaining amount as shown next to the total; `0` when no budget is set.
    pub fn remain_display(&self) -> i64 {
        self.remain.unwrap_or(0)
    }

    /// Percentage truncated toward zero, as drawn on the bar.
    pub fn percent_display(&self) -> i64 {
        truncate(self.percent)
    }

    /// Human readable status line.
    pub fn note(&self, style: &CurrencyStyle) -> String {
        match self.status {
            BudgetStatus::Unset => {
                "Set a budget to track progress of the selected total.".to_string()
            }
            BudgetStatus::Over { overage } => {
                format!("Over budget: {}", style.format_with_suffix(clamp_i64(overage)))
            }
            BudgetStatus::Within { remaining } => format!(
                "Within budget: {} left",
                style.format_with_suffix(clamp_i64(remaining))
            ),
        }
    }
}

/// Stateless budgeting helpers over item snapshots.
pub struct BudgetService;

impl BudgetService {
    pub fn selected_sum(items: &[Item]) -> u64 {
        items
            .iter()
            .filter(|item| item.selected)
            .fold(0u64, |acc, item| acc.saturating_add(item.price))
    }

    pub fn progress(items: &[Item], budget: Option<u64>) -> BudgetProgress {
        let selected_sum = Self::selected_sum(items);
        let Some(budget) = budget else {
            return BudgetProgress {
                selected_sum,
                budget: None,
                remain: None,
                ratio: 0.0,
                percent: 0.0,
                over: false,
                status: BudgetStatus::Unset,
            };
        };

        let remain = clamp_i64(budget) - clamp_i64(selected_sum);
        let ratio = if budget == 0 {
            if selected_sum > 0 {
                1.0
            } else {
                0.0
            }
        } else {
            (selected_sum as f64 / budget as f64).min(MAX_DISPLAY_RATIO)
        };
        let percent = (ratio * 100.0).min(MAX_DISPLAY_PERCENT);
        let over = selected_sum > budget;
        let status = if over {
            BudgetStatus::Over {
                overage: selected_sum - budget,
            }
        } else {
            BudgetStatus::Within {
                remaining: budget - selected_sum,
            }
        };

        BudgetProgress {
            selected_sum,
            budget: Some(budget),
            remain: Some(remain),
            ratio,
            percent,
            over,
            status,
        }
    }

    pub fn progress_for(snapshot: &MonthSnapshot) -> BudgetProgress {
        Self::progress(&snapshot.items, snapshot.budget)
    }
}

fn clamp_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
