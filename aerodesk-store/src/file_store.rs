use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use aerodesk_core::{KeyValueStore, StorageError};
use tempfile::NamedTempFile;
use tracing::debug;

/// Key-value store kept in a single JSON object file, one string value per key.
///
/// Every write rewrites the file through a temp file and an atomic rename.
/// With a quota set, a write that would grow the file past it is refused
/// and the file stays as it was.
pub struct JsonFileStore {
    path: PathBuf,
    quota_bytes: Option<usize>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quota_bytes: None,
        }
    }

    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw)
            .map_err(|e| StorageError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let text = serde_json::to_string(values)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;

        if let Some(quota) = self.quota_bytes {
            if text.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    required: text.len(),
                    quota,
                });
            }
        }

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;

        debug!(path = %self.path.display(), bytes = text.len(), "Storage file written");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("storage.json"));
        assert_eq!(store.get("any").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.path(), path.as_path());

        store.set("a", "[1]").unwrap();
        store.set("b", "two").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("[1]"));

        // A second handle on the same file sees the same values.
        let other = JsonFileStore::new(&path);
        assert_eq!(other.get("b").unwrap().as_deref(), Some("two"));

        store.remove("a").unwrap();
        store.remove("never-set").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_quota_refuses_write_and_keeps_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let mut store = JsonFileStore::new(&path).with_quota(32);

        store.set("k", "small").unwrap();
        let err = store.set("k", &"x".repeat(64)).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 32, .. }));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.get("k"), Err(StorageError::Corrupt(_))));
        assert!(matches!(store.set("k", "v"), Err(StorageError::Corrupt(_))));
    }
}
