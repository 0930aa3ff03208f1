use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::core::utils::{ensure_dir, PathResolver};

use super::{BlobStore, Result};

const BLOB_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed blob store: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = PathResolver::resolve_base(root);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn blob_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), BLOB_EXTENSION))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.blob_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.blob_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "blob".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (FileBlobStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = FileBlobStore::new(Some(temp.path().to_path_buf())).expect("blob store");
        (store, temp)
    }

    #[test]
    fn missing_blob_reads_as_none() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store.get("wish_matrix_v2").expect("get").is_none());
    }

    #[test]
    fn set_then_get_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        store.set("wish_matrix_v2", "{\"months\":{}}").expect("set");
        let loaded = store.get("wish_matrix_v2").expect("get");
        assert_eq!(loaded.as_deref(), Some("{\"months\":{}}"));
        assert!(!tmp_path(&store.blob_path("wish_matrix_v2")).exists());
    }

    #[test]
    fn failed_write_preserves_previous_blob() {
        let (store, _guard) = store_with_temp_dir();
        store.set("doc", "first").expect("initial write");
        // A directory squatting on the temp file name makes File::create fail.
        fs::create_dir_all(tmp_path(&store.blob_path("doc"))).unwrap();
        assert!(store.set("doc", "second").is_err());
        assert_eq!(store.get("doc").unwrap().as_deref(), Some("first"));
    }

    #[test]
    fn keys_are_sanitized_into_file_names() {
        let (store, _guard) = store_with_temp_dir();
        let path = store.blob_path("../escape me");
        assert_eq!(path.parent(), Some(store.base_dir()));
    }
}
