//! RecordStore - Abstract storage for record collections.

use super::{Batch, Record, RecordKey, StoreError, Transaction};

/// Abstract storage for record collections.
///
/// `get_all`/`get` read committed rows; single-row `put`/`delete` exist for
/// seeding and tests, but multi-row operations go through [`Transaction`]
/// so the whole write set applies atomically.
pub trait RecordStore: Send + Sync {
    /// Fetch every row of a collection, in unspecified order.
    fn get_all<R: Record>(&self) -> Result<Vec<R>, StoreError>;

    /// Get a row by key. Returns None if not found.
    fn get<R: Record>(&self, key: &RecordKey) -> Result<Option<R>, StoreError>;

    /// Upsert a single row outside of any transaction.
    fn put<R: Record>(&self, record: &R) -> Result<(), StoreError>;

    /// Delete a row by key. Returns true if it existed.
    fn delete<R: Record>(&self, key: &RecordKey) -> Result<bool, StoreError>;

    /// Allocate the next surrogate id for a collection.
    fn next_id(&self, collection: &str) -> Result<u64, StoreError>;

    /// Apply a pre-serialized batch of writes atomically. Used by
    /// [`Transaction::commit`] for type-erased all-or-nothing writes.
    fn apply(&self, batch: Batch) -> Result<(), StoreError>;

    /// Start a transaction against this store.
    fn transaction(&self) -> Transaction<'_, Self>
    where
        Self: Sized,
    {
        Transaction::new(self)
    }
}
