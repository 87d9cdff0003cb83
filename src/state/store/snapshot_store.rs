use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use super::storage::{KeyValueStorage, StorageError};

// ============================================================================
// Generic Snapshot Store - One aggregate, one slot
// ============================================================================
//
// Type Parameter:
// - `A`: The aggregate type stored as a JSON snapshot
//
// Responsibilities:
// 1. Encode the full aggregate into its slot
// 2. Decode the slot back into the aggregate
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct SnapshotStore<A> {
    key: String,
    _phantom: PhantomData<A>,
}

impl<A: Serialize + DeserializeOwned> SnapshotStore<A> {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            _phantom: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the snapshot; `Ok(None)` when the slot has never been written
    pub fn load(&self, storage: &impl KeyValueStorage) -> Result<Option<A>, StorageError> {
        let Some(raw) = storage.get_item(&self.key)? else {
            return Ok(None);
        };

        let state = serde_json::from_str(&raw)?;
        tracing::debug!(key = %self.key, bytes = raw.len(), "Loaded snapshot");
        Ok(Some(state))
    }

    /// Overwrite the slot with the full aggregate
    pub fn save(&self, storage: &mut impl KeyValueStorage, state: &A) -> Result<(), StorageError> {
        let json = serde_json::to_string(state)?;
        storage.set_item(&self.key, &json)
    }
}
