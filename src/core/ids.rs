//! Item id generation.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::domain::ItemId;

/// Produces identifiers unique within a document's lifetime.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> ItemId;
}

/// Random v4 UUIDs, the default for real sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> ItemId {
        ItemId::new(Uuid::new_v4().to_string())
    }
}

/// Deterministic `prefix-1`, `prefix-2`, ... ids for tests and scripted sessions.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> ItemId {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        ItemId::new(format!("{}-{}", self.prefix, n))
    }
}
