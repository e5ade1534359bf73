//! InMemoryStore - HashMap-backed record store.
//!
//! The embedded store the tracker runs against: rows live in one map keyed
//! by `"collection:key"`, batches apply under a single write lock so a
//! committed transaction is never half-visible. Clone-friendly via Arc.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{Batch, BatchOp, Record, RecordKey, RecordStore, StoreError};

#[derive(Default)]
struct Inner {
    rows: HashMap<String, Vec<u8>>,
    id_counters: HashMap<String, u64>,
}

/// In-memory record store backed by a HashMap.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn make_key(collection: &str, key: &RecordKey) -> String {
        format!("{}:{}", collection, key)
    }
}

impl RecordStore for InMemoryStore {
    fn get_all<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        let prefix = format!("{}:", R::COLLECTION);
        let mut rows = Vec::new();
        for (key, bytes) in inner.rows.iter() {
            if key.starts_with(&prefix) {
                let row: R = serde_json::from_slice(bytes)
                    .map_err(|e| StoreError::Serde(e.to_string()))?;
                rows.push(row);
            }
        }
        Ok(rows)
    }

    fn get<R: Record>(&self, key: &RecordKey) -> Result<Option<R>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        match inner.rows.get(&Self::make_key(R::COLLECTION, key)) {
            Some(bytes) => {
                let row: R = serde_json::from_slice(bytes)
                    .map_err(|e| StoreError::Serde(e.to_string()))?;
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }

    fn put<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(record).map_err(|e| StoreError::Serde(e.to_string()))?;
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        inner
            .rows
            .insert(Self::make_key(R::COLLECTION, &record.key()), bytes);
        Ok(())
    }

    fn delete<R: Record>(&self, key: &RecordKey) -> Result<bool, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        Ok(inner
            .rows
            .remove(&Self::make_key(R::COLLECTION, key))
            .is_some())
    }

    fn next_id(&self, collection: &str) -> Result<u64, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("next_id"))?;

        // Imported rows carry ids this store never allocated; skip past
        // them so an allocation cannot collide with an existing row.
        let prefix = format!("{}:", collection);
        let highest_existing = inner
            .rows
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix)?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        let counter = inner.id_counters.entry(collection.to_string()).or_insert(0);
        *counter = (*counter).max(highest_existing) + 1;
        Ok(*counter)
    }

    fn apply(&self, batch: Batch) -> Result<(), StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("apply"))?;

        // Rows arrive pre-serialized, so nothing below can fail and the
        // whole batch lands under one lock acquisition.
        for entry in batch.entries {
            let key = Self::make_key(entry.collection, &entry.key);
            match entry.op {
                BatchOp::Put { bytes } => {
                    inner.rows.insert(key, bytes);
                }
                BatchOp::Delete => {
                    inner.rows.remove(&key);
                }
            }
        }
        Ok(())
    }
}
