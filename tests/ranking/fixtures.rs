//! Shared fixtures for rank engine tests.

use std::sync::Mutex;

use coaster_top::{Batch, Coaster, InMemoryStore, Record, RecordKey, RecordStore, StoreError};

/// Store wrapper that records the size of every committed batch, so tests
/// can assert how many rows an operation wrote.
#[derive(Default)]
pub struct CountingStore {
    inner: InMemoryStore,
    batches: Mutex<Vec<usize>>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sizes of the batches committed so far, in order.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().clone()
    }
}

impl RecordStore for CountingStore {
    fn get_all<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        self.inner.get_all()
    }

    fn get<R: Record>(&self, key: &RecordKey) -> Result<Option<R>, StoreError> {
        self.inner.get(key)
    }

    fn put<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        self.inner.put(record)
    }

    fn delete<R: Record>(&self, key: &RecordKey) -> Result<bool, StoreError> {
        self.inner.delete::<R>(key)
    }

    fn next_id(&self, collection: &str) -> Result<u64, StoreError> {
        self.inner.next_id(collection)
    }

    fn apply(&self, batch: Batch) -> Result<(), StoreError> {
        self.batches.lock().unwrap().push(batch.entries.len());
        self.inner.apply(batch)
    }
}

/// A coaster with a fixed id and rank.
pub fn coaster(id: u64, name: &str, rank: u32) -> Coaster {
    let mut coaster = Coaster::new(name, "PortAventura", "B&M");
    coaster.id = id;
    coaster.rank = rank;
    coaster
}

/// Persist `n` coasters ranked 1..=n and return them rank-sorted.
pub fn seeded_list<S: RecordStore>(store: &S, n: u64) -> Vec<Coaster> {
    for i in 1..=n {
        store.put(&coaster(i, &format!("Coaster {}", i), i as u32)).unwrap();
    }
    coaster_top::rank::load(store).unwrap()
}

/// In-memory ranks in list order.
pub fn ranks(list: &[Coaster]) -> Vec<u32> {
    list.iter().map(|c| c.rank).collect()
}

/// Ids in list order.
pub fn ids(list: &[Coaster]) -> Vec<u64> {
    list.iter().map(|c| c.id).collect()
}

/// Persisted ranks, sorted ascending.
pub fn persisted_ranks<S: RecordStore>(store: &S) -> Vec<u32> {
    let mut ranks: Vec<u32> = store
        .get_all::<Coaster>()
        .unwrap()
        .iter()
        .map(|c| c.rank)
        .collect();
    ranks.sort_unstable();
    ranks
}
