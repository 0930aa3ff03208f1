#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use once_cell::sync::Lazy;
use tempfile::TempDir;
use wish_matrix::{
    core::{MonthItemStore, SequentialIds},
    domain::MonthKey,
    storage::FileBlobStore,
};

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated data directory for one test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens (or reopens) the file-backed store under `base`.
pub fn open_store(base: &Path, key: &str) -> MonthItemStore {
    let backend = FileBlobStore::new(Some(base.to_path_buf())).expect("create file blob store");
    MonthItemStore::open_with_ids(Box::new(backend), key, Box::new(SequentialIds::new("t")))
}

pub fn month(raw: &str) -> MonthKey {
    MonthKey::parse(raw).expect("valid month key")
}
