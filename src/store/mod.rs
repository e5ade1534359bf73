//! Store - Embedded transactional key-value storage for ranked collections.
//!
//! Rows are serde-serializable records bound to a named collection. Every
//! logical operation in the crate funnels its writes through a single
//! [`Transaction`] so the store never observes a half-applied operation.
//!
//! ## Example
//!
//! ```ignore
//! use coaster_top::{InMemoryStore, Record, RecordsExt};
//!
//! let store = InMemoryStore::new();
//! store.records::<Park>().put(&park)?;
//! let parks = store.records::<Park>().all()?;
//! ```

mod in_memory;
mod records;
mod store;
mod transaction;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;

/// Trait for row types that can be stored in a named collection.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this record type (e.g. "coasters", "parks").
    const COLLECTION: &'static str;

    /// Returns the unique key of this row within its collection.
    fn key(&self) -> RecordKey;
}

/// Key of a stored row: an auto-allocated numeric surrogate for ride-like
/// rows, or a natural name string for parks and vocabulary rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordKey {
    Id(u64),
    Name(String),
}

impl RecordKey {
    /// Key of a ride row that has not been persisted yet.
    pub fn unassigned() -> Self {
        RecordKey::Id(0)
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, RecordKey::Id(0))
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Id(id) => write!(f, "{}", id),
            RecordKey::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<u64> for RecordKey {
    fn from(id: u64) -> Self {
        RecordKey::Id(id)
    }
}

impl From<&str> for RecordKey {
    fn from(name: &str) -> Self {
        RecordKey::Name(name.to_string())
    }
}

impl From<String> for RecordKey {
    fn from(name: String) -> Self {
        RecordKey::Name(name)
    }
}

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Serialization/deserialization error.
    Serde(String),
    /// Storage-level error.
    Storage(String),
    /// Internal lock poisoned.
    LockPoisoned(&'static str),
    /// Row not found.
    NotFound { collection: String, key: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Serde(msg) => write!(f, "record serialization error: {}", msg),
            StoreError::Storage(msg) => write!(f, "storage error: {}", msg),
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
            StoreError::NotFound { collection, key } => {
                write!(f, "record not found: {}:{}", collection, key)
            }
        }
    }
}

impl std::error::Error for StoreError {}

pub use in_memory::InMemoryStore;
pub use records::{Records, RecordsExt};
pub use store::RecordStore;
pub use transaction::{Batch, BatchEntry, BatchOp, Transaction};
