// ============================================================================
// State Store - Generic Persistence Layer
// ============================================================================
//
// This module contains GENERIC persistence infrastructure.
// Storage backends are string-keyed slots holding string values; snapshots
// of any serializable aggregate live in exactly one slot.
//
// ============================================================================

pub mod snapshot_store;
pub mod storage;

pub use snapshot_store::SnapshotStore;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
