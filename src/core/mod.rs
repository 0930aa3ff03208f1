//! The state and derivation engine.

pub mod commands;
pub mod drag;
pub mod ids;
pub mod month_store;
pub mod services;
pub mod utils;

pub use commands::{Command, CommandOutcome, Session};
pub use drag::{DragEvent, DragSession, DragState, DropIgnored, DropOutcome};
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use month_store::{MonthItemStore, MonthSnapshot};
