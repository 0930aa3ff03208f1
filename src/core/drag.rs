//! Drag-and-drop gestures mapped onto quadrant reassignment.
//!
//! Any toolkit can drive this as long as it reports drag start (item id),
//! hovering over a drop target (quadrant tag), drop (target tag plus the
//! optional payload carried by the gesture) and drag end.

use crate::{
    core::month_store::MonthItemStore,
    domain::{ItemId, MonthKey, Quadrant},
};

/// Interaction state of one drag gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        item: ItemId,
        /// Drop target currently marked as candidate.
        hover: Option<Quadrant>,
    },
}

/// Gesture events reported by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Start { item: ItemId },
    Over { target: String },
    Leave,
    Drop { target: String, payload: Option<String> },
    /// Cancelled, released outside any target, or the source row disappeared.
    End,
}

/// Why a drop did not move anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIgnored {
    /// Neither the payload nor the session knew which item was dragged.
    NoItem,
    /// The store rejected the target tag or no longer has the item.
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Moved { item: ItemId, quad: Quadrant },
    Ignored(DropIgnored),
}

/// Tracks the item being dragged and the highlighted drop target.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn dragging_id(&self) -> Option<&ItemId> {
        match &self.state {
            DragState::Dragging { item, .. } => Some(item),
            DragState::Idle => None,
        }
    }

    pub fn hover_target(&self) -> Option<Quadrant> {
        match &self.state {
            DragState::Dragging { hover, .. } => *hover,
            DragState::Idle => None,
        }
    }

    /// Records the dragged item. A new start replaces any unfinished gesture.
    pub fn start(&mut self, item: ItemId) {
        tracing::debug!(%item, "drag started");
        self.state = DragState::Dragging { item, hover: None };
    }

    /// Marks a drop candidate. Unknown tags clear the marker; no store mutation.
    pub fn hover(&mut self, target: &str) {
        if let DragState::Dragging { hover, .. } = &mut self.state {
            *hover = Quadrant::from_tag(target);
        }
    }

    pub fn leave(&mut self) {
        if let DragState::Dragging { hover, .. } = &mut self.state {
            *hover = None;
        }
    }

    /// Ends the gesture without mutation and clears every marker.
    pub fn abort(&mut self) {
        if self.is_dragging() {
            tracing::debug!("drag aborted");
        }
        self.state = DragState::Idle;
    }

    /// Commits a drop on `target`.
    ///
    /// The payload wins over the remembered id; an empty payload counts as
    /// missing. Duplicate drops are harmless: reassigning to the same quadrant
    /// again leaves the store as it was, and once idle a payload-less drop is a
    /// no-op.
    pub fn drop_on(
        &mut self,
        store: &mut MonthItemStore,
        month: &MonthKey,
        target: &str,
        payload: Option<&str>,
    ) -> DropOutcome {
        let resolved = payload
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(ItemId::new)
            .or_else(|| self.dragging_id().cloned());
        self.state = DragState::Idle;

        let Some(item) = resolved else {
            tracing::debug!(%month, target, "drop without a dragged item ignored");
            return DropOutcome::Ignored(DropIgnored::NoItem);
        };
        let Some(quad) = Quadrant::from_tag(target) else {
            tracing::debug!(%month, %item, target, "drop on unknown quadrant ignored");
            return DropOutcome::Ignored(DropIgnored::Rejected);
        };
        if store.reassign_quadrant(month, &item, quad.tag()) {
            DropOutcome::Moved { item, quad }
        } else {
            DropOutcome::Ignored(DropIgnored::Rejected)
        }
    }

    /// Feeds one gesture event; only `Drop` can produce an outcome.
    pub fn handle(
        &mut self,
        event: DragEvent,
        store: &mut MonthItemStore,
        month: &MonthKey,
    ) -> Option<DropOutcome> {
        match event {
            DragEvent::Start { item } => self.start(item),
            DragEvent::Over { target } => self.hover(&target),
            DragEvent::Leave => self.leave(),
            DragEvent::Drop { target, payload } => {
                return Some(self.drop_on(store, month, &target, payload.as_deref()))
            }
            DragEvent::End => self.abort(),
        }
        None
    }
}
