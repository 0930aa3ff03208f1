//! Key-value blob stores backing the persisted document.

pub mod json_backend;
pub mod memory;

use std::sync::Arc;

use crate::errors::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Abstraction over a key-value store holding one string blob per key.
pub trait BlobStore: Send + Sync {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: BlobStore + ?Sized> BlobStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

pub use json_backend::FileBlobStore;
pub use memory::MemoryBlobStore;
