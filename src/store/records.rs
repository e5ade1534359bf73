//! Records - Typed accessor for record CRUD operations.

use std::marker::PhantomData;

use super::{Record, RecordKey, RecordStore, StoreError};

/// Typed repository wrapper for accessing records of a specific type.
pub struct Records<'a, S, R> {
    store: &'a S,
    _marker: PhantomData<R>,
}

impl<'a, S: RecordStore, R: Record> Records<'a, S, R> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Fetch every row of the collection.
    pub fn all(&self) -> Result<Vec<R>, StoreError> {
        self.store.get_all()
    }

    /// Get a row by key.
    pub fn get(&self, key: &RecordKey) -> Result<Option<R>, StoreError> {
        self.store.get(key)
    }

    /// Upsert a row.
    pub fn put(&self, record: &R) -> Result<(), StoreError> {
        self.store.put(record)
    }

    /// Delete a row by key. Returns true if it existed.
    pub fn delete(&self, key: &RecordKey) -> Result<bool, StoreError> {
        self.store.delete::<R>(key)
    }

    /// Find rows matching a predicate.
    pub fn find(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<R>, StoreError> {
        let mut rows = self.store.get_all::<R>()?;
        rows.retain(|row| predicate(row));
        Ok(rows)
    }
}

/// Extension trait for typed record access on any RecordStore.
pub trait RecordsExt: RecordStore + Sized {
    /// Get a typed record repository.
    fn records<R: Record>(&self) -> Records<'_, Self, R> {
        Records::new(self)
    }
}

impl<S: RecordStore> RecordsExt for S {}
