use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

// ============================================================================
// Key-Value Storage - Local-storage style slots
// ============================================================================
//
// Responsibilities:
// 1. Read a slot by key (absent slot is `Ok(None)`)
// 2. Overwrite a slot by key
//
// Backends may fail at any time; callers decide how to degrade.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage is unavailable: {0}")]
    Unavailable(String),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage contents are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// String-keyed storage slots
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

// ============================================================================
// In-memory backend
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot directly, bypassing any owner of the storage
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// File backend
// ============================================================================
//
// All slots live in one JSON object on disk: { "<key>": "<value>", ... }.
// Every write rewrites the whole file.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_slots(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&raw)?)
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_slots()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut slots = match self.read_slots() {
            Ok(slots) => slots,
            Err(StorageError::Corrupt(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Discarding corrupt storage file"
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };

        slots.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, serde_json::to_string_pretty(&slots)?)?;

        tracing::debug!(
            path = %self.path.display(),
            key = key,
            bytes = value.len(),
            "Wrote storage slot"
        );

        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_absent_slot() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("cc_cart").unwrap(), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_memory_storage_overwrites_slot() {
        let mut storage = MemoryStorage::new().with_item("cc_cart", "{}");
        storage.set_item("cc_cart", "{\"a\":1}").unwrap();

        assert_eq!(storage.get_item("cc_cart").unwrap().as_deref(), Some("{\"a\":1}"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_file_storage_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("storage.json"));
        assert_eq!(storage.get_item("cc_cart").unwrap(), None);
    }

    #[test]
    fn test_file_storage_creates_parent_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut storage = FileStorage::new(&path);
        storage.set_item("cc_cart", "{}").unwrap();
        storage.set_item("other", "x").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get_item("cc_cart").unwrap().as_deref(), Some("{}"));
        assert_eq!(reopened.get_item("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_file_storage_corrupt_file_is_error_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json at all").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(storage.get_item("cc_cart"), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_file_storage_write_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json at all").unwrap();

        let mut storage = FileStorage::new(&path);
        storage.set_item("cc_cart", "{}").unwrap();
        assert_eq!(storage.get_item("cc_cart").unwrap().as_deref(), Some("{}"));
    }
}
