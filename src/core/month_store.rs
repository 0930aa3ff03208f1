//! The month-scoped item store: sole owner of every item and budget.

use crate::{
    core::ids::{IdGenerator, UuidGenerator},
    currency::parse_int,
    domain::{Document, Item, ItemDraft, ItemId, MonthKey, Quadrant, ValidatedItem},
    errors::StoreError,
    storage::BlobStore,
    utils::persistence::{load_document, save_document, LoadReport, LoadSource},
};

/// Items and budget of one month, copied out for read-only derivations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSnapshot {
    pub month: MonthKey,
    pub items: Vec<Item>,
    pub budget: Option<u64>,
}

/// Facade that owns the document and writes it back after every mutation.
///
/// Write failures are logged and swallowed: the in-memory document stays
/// authoritative and the next successful write reconciles storage.
pub struct MonthItemStore {
    document: Document,
    backend: Box<dyn BlobStore>,
    storage_key: String,
    ids: Box<dyn IdGenerator>,
    load_source: LoadSource,
    load_warnings: Vec<String>,
}

impl MonthItemStore {
    /// Loads (and heals) the document stored under `storage_key`.
    pub fn open(backend: Box<dyn BlobStore>, storage_key: impl Into<String>) -> Self {
        Self::open_with_ids(backend, storage_key, Box::new(UuidGenerator))
    }

    pub fn open_with_ids(
        backend: Box<dyn BlobStore>,
        storage_key: impl Into<String>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        let storage_key = storage_key.into();
        let LoadReport {
            document,
            source,
            warnings,
        } = load_document(backend.as_ref(), &storage_key, ids.as_ref());
        tracing::debug!(
            key = %storage_key,
            ?source,
            months = document.months.len(),
            items = document.item_count(),
            "document loaded"
        );
        Self {
            document,
            backend,
            storage_key,
            ids,
            load_source: source,
            load_warnings: warnings,
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    /// Repairs applied while loading the stored document.
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Items of `month` in storage order; unseen months are materialized empty.
    pub fn get_items(&mut self, month: &MonthKey) -> &[Item] {
        self.document.items_mut(month).as_slice()
    }

    /// Like [`get_items`](Self::get_items) but without materializing the month.
    pub fn items(&self, month: &MonthKey) -> &[Item] {
        self.document.items(month)
    }

    pub fn item(&self, month: &MonthKey, id: &ItemId) -> Option<&Item> {
        self.document.items(month).iter().find(|item| &item.id == id)
    }

    pub fn snapshot(&self, month: &MonthKey) -> MonthSnapshot {
        MonthSnapshot {
            month: month.clone(),
            items: self.document.items(month).to_vec(),
            budget: self.document.budget(month),
        }
    }

    pub fn month_keys(&self) -> Vec<MonthKey> {
        self.document.month_keys().cloned().collect()
    }

    pub fn add_item(
        &mut self,
        month: &MonthKey,
        name: &str,
        price: i64,
        quad: Quadrant,
    ) -> Result<Item, StoreError> {
        let valid = ValidatedItem::new(name, price, quad)?;
        let item = Item::new(self.fresh_id(month), valid);
        self.document.items_mut(month).push(item.clone());
        tracing::debug!(%month, id = %item.id, price = item.price, quad = %item.quad, "item added");
        self.persist();
        Ok(item)
    }

    /// Replaces name, price and quadrant together once all three validate.
    pub fn edit_item(
        &mut self,
        month: &MonthKey,
        id: &ItemId,
        draft: &ItemDraft,
    ) -> Result<Item, StoreError> {
        let valid = draft.validate()?;
        let item = self
            .document
            .items_mut(month)
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        item.apply(valid);
        let updated = item.clone();
        tracing::debug!(%month, %id, "item edited");
        self.persist();
        Ok(updated)
    }

    pub fn delete_item(&mut self, month: &MonthKey, id: &ItemId) -> Result<(), StoreError> {
        let items = self.document.items_mut(month);
        let before = items.len();
        items.retain(|item| &item.id != id);
        if items.len() == before {
            return Err(StoreError::NotFound(id.clone()));
        }
        tracing::debug!(%month, %id, "item deleted");
        self.persist();
        Ok(())
    }

    /// Sets the selection flag. A missing id means the caller's view is stale and
    /// is ignored; returns whether an item was found.
    pub fn toggle_selected(&mut self, month: &MonthKey, id: &ItemId, value: bool) -> bool {
        let found = match self.find_mut(month, id) {
            Some(item) => {
                item.selected = value;
                true
            }
            None => false,
        };
        if found {
            tracing::debug!(%month, %id, selected = value, "selection changed");
            self.persist();
        } else {
            tracing::debug!(%month, %id, "selection toggle for unknown item ignored");
        }
        found
    }

    pub fn clear_selected(&mut self, month: &MonthKey) {
        for item in self.document.items_mut(month).iter_mut() {
            item.selected = false;
        }
        tracing::debug!(%month, "selection cleared");
        self.persist();
    }

    /// Removes every selected item of the month; returns how many were removed.
    pub fn delete_all_selected(&mut self, month: &MonthKey) -> usize {
        let items = self.document.items_mut(month);
        let before = items.len();
        items.retain(|item| !item.selected);
        let removed = before - items.len();
        tracing::debug!(%month, removed, "selected items deleted");
        self.persist();
        removed
    }

    /// Moves an item to the quadrant named by `tag`. Unknown tags and unknown ids
    /// are ignored (the latter can race with a delete); returns whether it moved.
    pub fn reassign_quadrant(&mut self, month: &MonthKey, id: &ItemId, tag: &str) -> bool {
        let Some(quad) = Quadrant::from_tag(tag) else {
            tracing::debug!(%month, %id, tag, "reassignment to unknown quadrant ignored");
            return false;
        };
        match self.find_mut(month, id) {
            Some(item) => item.quad = quad,
            None => {
                tracing::debug!(%month, %id, "reassignment of unknown item ignored");
                return false;
            }
        }
        tracing::debug!(%month, %id, %quad, "item reassigned");
        self.persist();
        true
    }

    /// Stores a non-negative budget; `None` or a negative value clears it.
    pub fn set_budget(&mut self, month: &MonthKey, value: Option<i64>) {
        let amount = value.and_then(|v| u64::try_from(v).ok());
        self.document.set_budget(month, amount);
        tracing::debug!(%month, budget = ?amount, "budget updated");
        self.persist();
    }

    /// Budget from free-form text; anything that is not a non-negative integer clears it.
    pub fn set_budget_text(&mut self, month: &MonthKey, raw: &str) {
        self.set_budget(month, parse_int(raw));
    }

    pub fn get_budget(&self, month: &MonthKey) -> Option<u64> {
        self.document.budget(month)
    }

    /// Drops every item and the budget of one month; the key stays materialized.
    pub fn clear_month(&mut self, month: &MonthKey) {
        self.document.items_mut(month).clear();
        self.document.set_budget(month, None);
        tracing::debug!(%month, "month cleared");
        self.persist();
    }

    /// Writes the current document now. Failures are logged, never returned.
    pub fn persist(&self) {
        if let Err(err) = save_document(self.backend.as_ref(), &self.storage_key, &self.document)
        {
            tracing::warn!(key = %self.storage_key, error = %err, "failed to persist document");
        }
    }

    fn find_mut(&mut self, month: &MonthKey, id: &ItemId) -> Option<&mut Item> {
        self.document
            .months
            .get_mut(month)?
            .iter_mut()
            .find(|item| &item.id == id)
    }

    fn fresh_id(&self, month: &MonthKey) -> ItemId {
        let items = self.document.items(month);
        loop {
            let candidate = self.ids.next_id();
            if items.iter().all(|item| item.id != candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::SequentialIds;
    use crate::errors::ValidationError;
    use crate::storage::MemoryBlobStore;
    use std::sync::Arc;

    const KEY: &str = "wish_matrix_v2";

    fn month() -> MonthKey {
        MonthKey::parse("2026-02").unwrap()
    }

    fn store() -> (MonthItemStore, Arc<MemoryBlobStore>) {
        let backend = Arc::new(MemoryBlobStore::new());
        let store = MonthItemStore::open_with_ids(
            Box::new(backend.clone()),
            KEY,
            Box::new(SequentialIds::new("item")),
        );
        (store, backend)
    }

    #[test]
    fn add_appends_unselected_item_and_persists() {
        let (mut store, backend) = store();
        let item = store
            .add_item(&month(), " Camera ", 50_000, Quadrant::Important)
            .expect("add");
        assert_eq!(item.name, "Camera");
        assert!(!item.selected);
        assert_eq!(store.items(&month()), &[item]);
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn add_rejects_empty_name_and_negative_price() {
        let (mut store, backend) = store();
        let err = store
            .add_item(&month(), "   ", 10, Quadrant::Urgent)
            .unwrap_err();
        assert_eq!(err, StoreError::Validation(ValidationError::EmptyName));
        let err = store
            .add_item(&month(), "Lamp", -1, Quadrant::Urgent)
            .unwrap_err();
        assert_eq!(err, StoreError::Validation(ValidationError::InvalidPrice));
        assert!(store.items(&month()).is_empty());
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn edit_is_all_or_nothing() {
        let (mut store, _) = store();
        let item = store
            .add_item(&month(), "Chair", 8_000, Quadrant::Neither)
            .unwrap();

        let err = store
            .edit_item(&month(), &item.id, &ItemDraft::new("Stool", 4_000, "Z"))
            .unwrap_err();
        assert_eq!(err, StoreError::Validation(ValidationError::InvalidQuadrant));
        assert_eq!(store.item(&month(), &item.id), Some(&item));

        let updated = store
            .edit_item(&month(), &item.id, &ItemDraft::new("Stool", 4_000, "u"))
            .unwrap();
        assert_eq!(updated.name, "Stool");
        assert_eq!(updated.price, 4_000);
        assert_eq!(updated.quad, Quadrant::Urgent);
        assert_eq!(updated.id, item.id);
    }

    #[test]
    fn edit_and_delete_report_missing_ids() {
        let (mut store, _) = store();
        let ghost = ItemId::new("ghost");
        assert!(store
            .edit_item(&month(), &ghost, &ItemDraft::new("X", 1, "I"))
            .unwrap_err()
            .is_not_found());
        assert_eq!(
            store.delete_item(&month(), &ghost),
            Err(StoreError::NotFound(ghost))
        );
    }

    #[test]
    fn stale_toggle_and_reassign_are_silent() {
        let (mut store, backend) = store();
        let ghost = ItemId::new("ghost");
        assert!(!store.toggle_selected(&month(), &ghost, true));
        assert!(!store.reassign_quadrant(&month(), &ghost, "I"));
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn reassign_to_unknown_tag_leaves_item_unchanged() {
        let (mut store, _) = store();
        let item = store.add_item(&month(), "Bag", 3_000, Quadrant::Urgent).unwrap();
        for tag in ["", "X", "iu", "IUN"] {
            assert!(!store.reassign_quadrant(&month(), &item.id, tag));
        }
        assert_eq!(store.item(&month(), &item.id), Some(&item));
        assert!(store.reassign_quadrant(&month(), &item.id, "IU"));
        assert_eq!(
            store.item(&month(), &item.id).map(|item| item.quad),
            Some(Quadrant::ImportantUrgent)
        );
    }

    #[test]
    fn bulk_selection_operations() {
        let (mut store, backend) = store();
        let a = store.add_item(&month(), "A", 1, Quadrant::Important).unwrap();
        let b = store.add_item(&month(), "B", 2, Quadrant::Important).unwrap();
        store.add_item(&month(), "C", 3, Quadrant::Important).unwrap();
        store.toggle_selected(&month(), &a.id, true);
        store.toggle_selected(&month(), &b.id, true);

        store.clear_selected(&month());
        let once = store.snapshot(&month());
        store.clear_selected(&month());
        assert_eq!(store.snapshot(&month()), once);
        assert!(once.items.iter().all(|item| !item.selected));

        store.toggle_selected(&month(), &b.id, true);
        let writes = backend.write_count();
        assert_eq!(store.delete_all_selected(&month()), 1);
        assert_eq!(backend.write_count(), writes + 1);
        let names: Vec<_> = store.items(&month()).iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn budget_is_cleared_by_negative_or_unparsable_values() {
        let (mut store, _) = store();
        store.set_budget(&month(), Some(40_000));
        assert_eq!(store.get_budget(&month()), Some(40_000));
        store.set_budget(&month(), Some(-1));
        assert_eq!(store.get_budget(&month()), None);
        store.set_budget_text(&month(), "15,000円");
        assert_eq!(store.get_budget(&month()), Some(15_000));
        store.set_budget_text(&month(), "");
        assert_eq!(store.get_budget(&month()), None);
        store.set_budget(&month(), Some(0));
        assert_eq!(store.get_budget(&month()), Some(0));
    }

    #[test]
    fn get_items_materializes_unseen_month() {
        let (mut store, _) = store();
        let unseen = MonthKey::parse("2030-01").unwrap();
        assert!(store.get_items(&unseen).is_empty());
        assert_eq!(store.month_keys(), vec![unseen.clone()]);
        assert_eq!(store.get_budget(&unseen), None);
    }

    #[test]
    fn clear_month_keeps_key_but_drops_items_and_budget() {
        let (mut store, _) = store();
        store.add_item(&month(), "A", 1, Quadrant::Neither).unwrap();
        store.set_budget(&month(), Some(100));
        store.clear_month(&month());
        assert!(store.items(&month()).is_empty());
        assert_eq!(store.get_budget(&month()), None);
        assert_eq!(store.month_keys(), vec![month()]);
    }

    #[test]
    fn months_are_independent() {
        let (mut store, _) = store();
        let march = MonthKey::parse("2026-03").unwrap();
        store.add_item(&month(), "Feb", 1, Quadrant::Neither).unwrap();
        store.set_budget(&march, Some(5));
        assert!(store.items(&march).is_empty());
        assert_eq!(store.get_budget(&month()), None);
    }

    #[test]
    fn write_failures_do_not_reach_the_caller() {
        let (mut store, backend) = store();
        backend.set_fail_writes(true);
        let item = store
            .add_item(&month(), "Offline", 10, Quadrant::Important)
            .expect("in-memory add still succeeds");
        assert_eq!(store.items(&month()).len(), 1);
        assert!(backend.raw(KEY).is_none());

        backend.set_fail_writes(false);
        store.toggle_selected(&month(), &item.id, true);
        let stored = backend.raw(KEY).expect("reconciled on next write");
        assert!(stored.contains("Offline"));
    }

    #[test]
    fn generated_ids_skip_collisions_with_existing_items() {
        let backend = Arc::new(MemoryBlobStore::with_blob(
            KEY,
            r#"{"months":{"2026-02":[{"id":"item-1","name":"Old","price":1,"quad":"I","selected":false}]},"budgets":{}}"#,
        ));
        let mut store = MonthItemStore::open_with_ids(
            Box::new(backend),
            KEY,
            Box::new(SequentialIds::new("item")),
        );
        let fresh = store.add_item(&month(), "New", 2, Quadrant::Urgent).unwrap();
        assert_eq!(fresh.id.as_str(), "item-2");
    }
}
