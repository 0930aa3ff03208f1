//! Stateless derivations over month snapshots. Nothing here mutates the store.

pub mod budget_service;
pub mod view_service;

pub use budget_service::{BudgetProgress, BudgetService, BudgetStatus};
pub use view_service::{QuadrantView, ViewService};

#[cfg(test)]
mod tests;
