//! Transaction - Atomic multi-row, multi-collection write batches.
//!
//! ## Example
//!
//! ```ignore
//! let mut tx = store.transaction();
//! tx.put(&coaster_a)?;
//! tx.put(&coaster_b)?;
//! tx.delete::<Coaster>(&old_key);
//! tx.commit()?;
//! ```

use super::{Record, RecordKey, RecordStore, StoreError};

/// A single pending write within a batch.
#[derive(Debug, Clone)]
pub enum BatchOp {
    /// Upsert pre-serialized row bytes.
    Put { bytes: Vec<u8> },
    /// Remove the row if present.
    Delete,
}

/// One pending write addressed to a collection row.
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub collection: &'static str,
    pub key: RecordKey,
    pub op: BatchOp,
}

/// An ordered set of writes applied atomically by [`RecordStore::apply`].
///
/// Rows are serialized when they enter the batch, so a serialization
/// failure aborts before anything touches the store.
#[derive(Debug, Default)]
pub struct Batch {
    pub entries: Vec<BatchEntry>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Typed builder for an atomic write batch against one store.
pub struct Transaction<'a, S: RecordStore> {
    store: &'a S,
    batch: Batch,
}

impl<'a, S: RecordStore> Transaction<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            batch: Batch::default(),
        }
    }

    /// Queue an upsert. The row is serialized immediately.
    pub fn put<R: Record>(&mut self, record: &R) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(record).map_err(|e| StoreError::Serde(e.to_string()))?;
        self.batch.entries.push(BatchEntry {
            collection: R::COLLECTION,
            key: record.key(),
            op: BatchOp::Put { bytes },
        });
        Ok(())
    }

    /// Queue a delete.
    pub fn delete<R: Record>(&mut self, key: &RecordKey) {
        self.batch.entries.push(BatchEntry {
            collection: R::COLLECTION,
            key: key.clone(),
            op: BatchOp::Delete,
        });
    }

    /// Number of writes queued so far.
    pub fn len(&self) -> usize {
        self.batch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    /// Apply every queued write atomically. An empty transaction is a no-op.
    pub fn commit(self) -> Result<(), StoreError> {
        if self.batch.is_empty() {
            return Ok(());
        }
        self.store.apply(self.batch)
    }
}
