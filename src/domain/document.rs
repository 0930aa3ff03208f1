//! Root persisted state: per-month item lists plus per-month budgets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{item::Item, month::MonthKey};

/// The whole persisted document.
///
/// Both mappings are always present; a month key is materialized with an empty
/// item list the first time it is accessed mutably. A month without an entry in
/// `budgets` has no budget set, which is different from a budget of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub months: BTreeMap<MonthKey, Vec<Item>>,
    #[serde(default)]
    pub budgets: BTreeMap<MonthKey, u64>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view; unseen months read as empty.
    pub fn items(&self, month: &MonthKey) -> &[Item] {
        self.months.get(month).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mutable access that materializes the month on first touch.
    pub fn items_mut(&mut self, month: &MonthKey) -> &mut Vec<Item> {
        self.months.entry(month.clone()).or_default()
    }

    pub fn budget(&self, month: &MonthKey) -> Option<u64> {
        self.budgets.get(month).copied()
    }

    pub fn set_budget(&mut self, month: &MonthKey, value: Option<u64>) {
        match value {
            Some(amount) => {
                self.budgets.insert(month.clone(), amount);
            }
            None => {
                self.budgets.remove(month);
            }
        }
    }

    pub fn month_keys(&self) -> impl Iterator<Item = &MonthKey> {
        self.months.keys()
    }

    pub fn item_count(&self) -> usize {
        self.months.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> MonthKey {
        MonthKey::parse(raw).unwrap()
    }

    #[test]
    fn empty_document_serializes_with_both_mappings() {
        let json = serde_json::to_value(Document::new()).unwrap();
        assert_eq!(json, serde_json::json!({ "months": {}, "budgets": {} }));
    }

    #[test]
    fn items_mut_materializes_month() {
        let mut doc = Document::new();
        assert!(doc.items(&key("2026-02")).is_empty());
        assert_eq!(doc.month_keys().count(), 0);
        doc.items_mut(&key("2026-02"));
        assert_eq!(doc.month_keys().count(), 1);
    }

    #[test]
    fn clearing_budget_removes_entry() {
        let mut doc = Document::new();
        let month = key("2026-02");
        doc.set_budget(&month, Some(0));
        assert_eq!(doc.budget(&month), Some(0));
        doc.set_budget(&month, None);
        assert_eq!(doc.budget(&month), None);
        assert!(doc.budgets.is_empty());
    }
}
