//! Typed commands issued by a rendering layer, and the session that runs them.

use crate::{
    core::{
        drag::{DragEvent, DragSession, DropOutcome},
        month_store::{MonthItemStore, MonthSnapshot},
        services::{BudgetProgress, BudgetService, QuadrantView, ViewService},
    },
    domain::{Item, ItemDraft, ItemId, MonthKey, Quadrant},
    errors::StoreError,
};

/// Everything the UI can ask of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectMonth(MonthKey),
    ThisMonth,
    AddItem {
        name: String,
        price: i64,
        quad: Quadrant,
    },
    EditItem {
        id: ItemId,
        draft: ItemDraft,
    },
    DeleteItem {
        id: ItemId,
    },
    ToggleSelected {
        id: ItemId,
        value: bool,
    },
    ClearSelected,
    DeleteSelected,
    ReassignQuadrant {
        id: ItemId,
        quad: String,
    },
    SetBudget(Option<i64>),
    SetBudgetText(String),
    ClearMonth,
    Drag(DragEvent),
}

/// What a successful command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    MonthSelected(MonthKey),
    Added(Item),
    Edited(Item),
    Deleted(ItemId),
    /// `applied` is false when the id was stale and the toggle was ignored.
    SelectionChanged { id: ItemId, applied: bool },
    SelectionCleared,
    SelectedDeleted(usize),
    Reassigned { id: ItemId, applied: bool },
    BudgetUpdated(Option<u64>),
    MonthCleared,
    Drag(Option<DropOutcome>),
}

/// One user session: the store, the month being viewed and any drag in flight.
pub struct Session {
    store: MonthItemStore,
    month: MonthKey,
    drag: DragSession,
}

impl Session {
    pub fn new(store: MonthItemStore, month: MonthKey) -> Self {
        let mut session = Self {
            store,
            month,
            drag: DragSession::new(),
        };
        let month = session.month.clone();
        session.store.get_items(&month);
        session
    }

    pub fn month(&self) -> &MonthKey {
        &self.month
    }

    pub fn store(&self) -> &MonthItemStore {
        &self.store
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    pub fn items(&self) -> &[Item] {
        self.store.items(&self.month)
    }

    pub fn snapshot(&self) -> MonthSnapshot {
        self.store.snapshot(&self.month)
    }

    pub fn view(&self) -> QuadrantView {
        ViewService::build(self.items())
    }

    pub fn progress(&self) -> BudgetProgress {
        BudgetService::progress(self.items(), self.store.get_budget(&self.month))
    }

    /// Runs one command against the current month.
    ///
    /// Only validation failures and explicit edit/delete of a missing id are
    /// errors; everything else degrades to a no-op.
    pub fn dispatch(&mut self, command: Command) -> Result<CommandOutcome, StoreError> {
        let month = self.month.clone();
        let outcome = match command {
            Command::SelectMonth(next) => self.select_month(next),
            Command::ThisMonth => self.select_month(MonthKey::current()),
            Command::AddItem { name, price, quad } => {
                CommandOutcome::Added(self.store.add_item(&month, &name, price, quad)?)
            }
            Command::EditItem { id, draft } => {
                CommandOutcome::Edited(self.store.edit_item(&month, &id, &draft)?)
            }
            Command::DeleteItem { id } => {
                self.store.delete_item(&month, &id)?;
                if self.drag.dragging_id() == Some(&id) {
                    self.drag.abort();
                }
                CommandOutcome::Deleted(id)
            }
            Command::ToggleSelected { id, value } => {
                let applied = self.store.toggle_selected(&month, &id, value);
                CommandOutcome::SelectionChanged { id, applied }
            }
            Command::ClearSelected => {
                self.store.clear_selected(&month);
                CommandOutcome::SelectionCleared
            }
            Command::DeleteSelected => {
                let removed = self.store.delete_all_selected(&month);
                let dragged_gone = self
                    .drag
                    .dragging_id()
                    .is_some_and(|id| self.store.item(&month, id).is_none());
                if dragged_gone {
                    self.drag.abort();
                }
                CommandOutcome::SelectedDeleted(removed)
            }
            Command::ReassignQuadrant { id, quad } => {
                let applied = self.store.reassign_quadrant(&month, &id, &quad);
                CommandOutcome::Reassigned { id, applied }
            }
            Command::SetBudget(value) => {
                self.store.set_budget(&month, value);
                CommandOutcome::BudgetUpdated(self.store.get_budget(&month))
            }
            Command::SetBudgetText(raw) => {
                self.store.set_budget_text(&month, &raw);
                CommandOutcome::BudgetUpdated(self.store.get_budget(&month))
            }
            Command::ClearMonth => {
                self.store.clear_month(&month);
                self.drag.abort();
                CommandOutcome::MonthCleared
            }
            Command::Drag(event) => {
                CommandOutcome::Drag(self.drag.handle(event, &mut self.store, &month))
            }
        };
        Ok(outcome)
    }

    /// Switching months never migrates data; rows of the old month go stale, so
    /// any drag in flight is abandoned.
    fn select_month(&mut self, next: MonthKey) -> CommandOutcome {
        self.drag.abort();
        self.store.get_items(&next);
        tracing::debug!(from = %self.month, to = %next, "month selected");
        self.month = next.clone();
        CommandOutcome::MonthSelected(next)
    }
}
