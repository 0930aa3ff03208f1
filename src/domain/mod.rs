//! Domain types for the wish matrix: quadrants, items, month keys and the
//! persisted document that owns them.

pub mod common;
pub mod document;
pub mod item;
pub mod month;
pub mod quadrant;

pub use common::{Displayable, Identifiable};
pub use document::Document;
pub use item::{Item, ItemDraft, ItemId, ValidatedItem};
pub use month::MonthKey;
pub use quadrant::Quadrant;
