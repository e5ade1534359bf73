//! Catalog - Application state over one record store.
//!
//! The catalog owns the store handle and the in-memory, rank-sorted lists
//! for every collection. All mutation goes through its methods: each
//! operation runs the rank engine against a working list, commits one
//! transaction, then discards and reloads the affected lists from the
//! store. The reload also runs when a transaction fails, so the in-memory
//! view matches the persisted state before the error propagates.
//!
//! ## Example
//!
//! ```ignore
//! use coaster_top::{Catalog, Coaster, Direction, InMemoryStore};
//!
//! let mut catalog = Catalog::open(InMemoryStore::new())?;
//! catalog.upsert_coaster(Coaster::new("Shambhala", "PortAventura", "B&M"), None, true)?;
//! catalog.move_coaster(1, Direction::Up)?;
//! ```

mod rename;

use std::collections::HashSet;
use std::fmt;

use log::{info, warn};

use crate::backup::{self, BackupError, ImportSummary, Snapshot};
use crate::domain::{
    Coaster, FlatManufacturer, FlatRide, FlatRideModel, Manufacturer, Park, Ride, RideModel,
    VocabRecord, UNRANKED_PARK,
};
use crate::rank::{self as engine, Direction, Ranked};
use crate::store::{Record, RecordKey, RecordStore, StoreError};

/// Error type for catalog operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A row with that natural key already exists; nothing was written.
    DuplicateKey {
        collection: &'static str,
        key: String,
    },
    /// The operation targeted a reserved sentinel row.
    ReservedRow {
        collection: &'static str,
        key: String,
    },
    /// No row with that key exists.
    UnknownKey {
        collection: &'static str,
        key: String,
    },
    /// Malformed import payload; nothing was written.
    Import(String),
    /// The underlying store failed; the catalog has been resynchronized.
    Store(StoreError),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicateKey { collection, key } => {
                write!(f, "{} row '{}' already exists", collection, key)
            }
            CatalogError::ReservedRow { collection, key } => {
                write!(f, "{} row '{}' is reserved", collection, key)
            }
            CatalogError::UnknownKey { collection, key } => {
                write!(f, "no {} row named '{}'", collection, key)
            }
            CatalogError::Import(msg) => write!(f, "import failed: {}", msg),
            CatalogError::Store(err) => write!(f, "store failure: {}", err),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        CatalogError::Store(err)
    }
}

impl From<BackupError> for CatalogError {
    fn from(err: BackupError) -> Self {
        match err {
            BackupError::Parse(msg) => CatalogError::Import(msg),
            BackupError::Store(err) => CatalogError::Store(err),
        }
    }
}

/// Application state: the store plus rank-sorted in-memory lists for every
/// collection.
pub struct Catalog<S: RecordStore> {
    store: S,
    coasters: Vec<Coaster>,
    flats: Vec<FlatRide>,
    parks: Vec<Park>,
    manufacturers: Vec<Manufacturer>,
    models: Vec<RideModel>,
    flat_manufacturers: Vec<FlatManufacturer>,
    flat_models: Vec<FlatRideModel>,
}

impl<S: RecordStore> Catalog<S> {
    /// Open a catalog over a store, seeding sentinels and running legacy
    /// migrations before returning. Callers never observe a collection
    /// missing its sentinel rows.
    pub fn open(store: S) -> Result<Self, CatalogError> {
        let mut catalog = Self {
            store,
            coasters: Vec::new(),
            flats: Vec::new(),
            parks: Vec::new(),
            manufacturers: Vec::new(),
            models: Vec::new(),
            flat_manufacturers: Vec::new(),
            flat_models: Vec::new(),
        };
        catalog.load()?;
        Ok(catalog)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Discard every in-memory list and rebuild it from the store,
    /// seeding missing sentinel rows and migrating legacy rows first.
    pub fn load(&mut self) -> Result<(), CatalogError> {
        self.parks = engine::load(&self.store)?;
        if !self.parks.iter().any(|p| p.name == UNRANKED_PARK) {
            info!("parks: seeding reserved row '{}'", UNRANKED_PARK);
            self.store.put(&Park::unranked())?;
            self.parks = engine::load(&self.store)?;
        }

        self.manufacturers = load_vocab(&self.store)?;
        self.models = load_vocab(&self.store)?;
        self.flat_manufacturers = load_vocab(&self.store)?;
        self.flat_models = load_vocab(&self.store)?;

        self.coasters = engine::load(&self.store)?;
        self.flats = engine::load(&self.store)?;

        self.migrate_legacy_rows()?;
        Ok(())
    }

    /// Backfill legacy rows in one all-or-nothing transaction: rides
    /// without a model reference get the sentinel model, and sentinel rows
    /// persisted before the reserved flag existed get tagged. Collections
    /// are re-fetched only when at least one of their rows was touched.
    fn migrate_legacy_rows(&mut self) -> Result<(), CatalogError> {
        let mut tx = self.store.transaction();
        let mut touched_coasters = false;
        let mut touched_flats = false;
        let mut touched_parks = false;

        for coaster in self.coasters.iter_mut().filter(|c| c.model.is_none()) {
            coaster.model = Some(RideModel::SENTINEL_NAME.to_string());
            tx.put(coaster)?;
            touched_coasters = true;
        }
        for flat in self.flats.iter_mut().filter(|f| f.model.is_none()) {
            flat.model = Some(FlatRideModel::SENTINEL_NAME.to_string());
            tx.put(flat)?;
            touched_flats = true;
        }
        for park in self.parks.iter_mut() {
            if park.name == UNRANKED_PARK && !park.reserved {
                *park = Park::unranked();
                tx.put(park)?;
                touched_parks = true;
            }
        }
        let touched_mfg = tag_legacy_sentinels(&mut tx, &mut self.manufacturers)?;
        let touched_models = tag_legacy_sentinels(&mut tx, &mut self.models)?;
        let touched_flat_mfg = tag_legacy_sentinels(&mut tx, &mut self.flat_manufacturers)?;
        let touched_flat_models = tag_legacy_sentinels(&mut tx, &mut self.flat_models)?;

        if tx.is_empty() {
            return Ok(());
        }
        let migrated = tx.len();
        tx.commit()?;
        info!("migrated {} legacy rows", migrated);

        if touched_coasters {
            self.coasters = engine::load(&self.store)?;
        }
        if touched_flats {
            self.flats = engine::load(&self.store)?;
        }
        if touched_parks {
            self.parks = engine::load(&self.store)?;
        }
        if touched_mfg {
            self.manufacturers = load_vocab(&self.store)?;
        }
        if touched_models {
            self.models = load_vocab(&self.store)?;
        }
        if touched_flat_mfg {
            self.flat_manufacturers = load_vocab(&self.store)?;
        }
        if touched_flat_models {
            self.flat_models = load_vocab(&self.store)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn coasters(&self) -> &[Coaster] {
        &self.coasters
    }

    pub fn flats(&self) -> &[FlatRide] {
        &self.flats
    }

    /// Every park, reserved row included (it sorts last).
    pub fn parks(&self) -> &[Park] {
        &self.parks
    }

    pub fn manufacturers(&self) -> &[Manufacturer] {
        &self.manufacturers
    }

    pub fn models(&self) -> &[RideModel] {
        &self.models
    }

    pub fn flat_manufacturers(&self) -> &[FlatManufacturer] {
        &self.flat_manufacturers
    }

    pub fn flat_models(&self) -> &[FlatRideModel] {
        &self.flat_models
    }

    // ------------------------------------------------------------------
    // Coasters
    // ------------------------------------------------------------------

    /// Swap-adjacent reorder. Out-of-bounds moves are a no-op.
    pub fn move_coaster(&mut self, index: usize, direction: Direction) -> Result<bool, CatalogError> {
        let result = engine::move_adjacent(&self.store, &mut self.coasters, index, direction);
        self.resync_coasters(result)
    }

    /// Drag repositioning by list index.
    pub fn move_coaster_to(&mut self, from: usize, to: usize) -> Result<bool, CatalogError> {
        let result = engine::move_to(&self.store, &mut self.coasters, from, to);
        self.resync_coasters(result)
    }

    /// Create or edit a coaster, optionally at an explicit 1-based rank.
    /// New rows get a surrogate id; rides without a model reference get
    /// the sentinel model.
    pub fn upsert_coaster(
        &mut self,
        mut coaster: Coaster,
        target_rank: Option<u32>,
        is_new: bool,
    ) -> Result<(), CatalogError> {
        if coaster.key().is_unassigned() {
            coaster.id = self.store.next_id(Coaster::COLLECTION)?;
        }
        if coaster.model.is_none() {
            coaster.model = Some(RideModel::SENTINEL_NAME.to_string());
        }
        let result = engine::insert_at_rank(&self.store, &mut self.coasters, coaster, target_rank, is_new);
        self.resync_coasters(result)
    }

    /// Bulk delete by surrogate id. Survivor ranks are left sparse until
    /// the next insert-at-rank.
    pub fn delete_coasters<I: IntoIterator<Item = u64>>(&mut self, ids: I) -> Result<usize, CatalogError> {
        let keys: HashSet<RecordKey> = ids.into_iter().map(RecordKey::Id).collect();
        let result = engine::delete_many(&self.store, &mut self.coasters, &keys);
        self.resync_coasters(result)
    }

    pub fn delete_coaster(&mut self, id: u64) -> Result<bool, CatalogError> {
        let result = engine::delete_one(&self.store, &mut self.coasters, &RecordKey::Id(id));
        self.resync_coasters(result)
    }

    // ------------------------------------------------------------------
    // Flats
    // ------------------------------------------------------------------

    pub fn move_flat(&mut self, index: usize, direction: Direction) -> Result<bool, CatalogError> {
        let result = engine::move_adjacent(&self.store, &mut self.flats, index, direction);
        self.resync_flats(result)
    }

    pub fn move_flat_to(&mut self, from: usize, to: usize) -> Result<bool, CatalogError> {
        let result = engine::move_to(&self.store, &mut self.flats, from, to);
        self.resync_flats(result)
    }

    pub fn upsert_flat(
        &mut self,
        mut flat: FlatRide,
        target_rank: Option<u32>,
        is_new: bool,
    ) -> Result<(), CatalogError> {
        if flat.key().is_unassigned() {
            flat.id = self.store.next_id(FlatRide::COLLECTION)?;
        }
        if flat.model.is_none() {
            flat.model = Some(FlatRideModel::SENTINEL_NAME.to_string());
        }
        let result = engine::insert_at_rank(&self.store, &mut self.flats, flat, target_rank, is_new);
        self.resync_flats(result)
    }

    pub fn delete_flats<I: IntoIterator<Item = u64>>(&mut self, ids: I) -> Result<usize, CatalogError> {
        let keys: HashSet<RecordKey> = ids.into_iter().map(RecordKey::Id).collect();
        let result = engine::delete_many(&self.store, &mut self.flats, &keys);
        self.resync_flats(result)
    }

    pub fn delete_flat(&mut self, id: u64) -> Result<bool, CatalogError> {
        let result = engine::delete_one(&self.store, &mut self.flats, &RecordKey::Id(id));
        self.resync_flats(result)
    }

    // ------------------------------------------------------------------
    // Parks
    // ------------------------------------------------------------------

    /// Swap-adjacent reorder over the user-facing park ranking. `index`
    /// addresses the list with the reserved row excluded.
    pub fn move_park(&mut self, index: usize, direction: Direction) -> Result<bool, CatalogError> {
        let mut working = self.ranked_park_rows();
        let result = engine::move_adjacent(&self.store, &mut working, index, direction);
        self.resync_parks(result)
    }

    pub fn move_park_to(&mut self, from: usize, to: usize) -> Result<bool, CatalogError> {
        let mut working = self.ranked_park_rows();
        let result = engine::move_to(&self.store, &mut working, from, to);
        self.resync_parks(result)
    }

    /// Create or edit a park. Creation rejects duplicate names; the
    /// reserved row cannot be targeted.
    pub fn upsert_park(
        &mut self,
        park: Park,
        target_rank: Option<u32>,
        is_new: bool,
    ) -> Result<(), CatalogError> {
        if park.reserved || park.name == UNRANKED_PARK {
            return Err(CatalogError::ReservedRow {
                collection: Park::COLLECTION,
                key: park.name,
            });
        }
        if is_new && self.parks.iter().any(|p| p.name == park.name) {
            return Err(CatalogError::DuplicateKey {
                collection: Park::COLLECTION,
                key: park.name,
            });
        }
        let mut working = self.ranked_park_rows();
        let result = engine::insert_at_rank(&self.store, &mut working, park, target_rank, is_new);
        self.resync_parks(result)
    }

    /// Bulk delete by name. Reserved rows are skipped.
    pub fn delete_parks<'a, I: IntoIterator<Item = &'a str>>(
        &mut self,
        names: I,
    ) -> Result<usize, CatalogError> {
        let keys: HashSet<RecordKey> = names
            .into_iter()
            .filter(|name| {
                !self
                    .parks
                    .iter()
                    .any(|p| p.reserved && p.name == *name)
            })
            .map(RecordKey::from)
            .collect();
        let result = engine::delete_many(&self.store, &mut self.parks, &keys);
        self.resync_parks(result)
    }

    pub fn delete_park(&mut self, name: &str) -> Result<bool, CatalogError> {
        self.delete_parks([name]).map(|removed| removed > 0)
    }

    /// Working copy of the user-facing park ranking (reserved excluded).
    fn ranked_park_rows(&self) -> Vec<Park> {
        self.parks
            .iter()
            .filter(|p| !p.is_reserved())
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------
    // Vocabulary management
    // ------------------------------------------------------------------

    pub fn add_manufacturer(&mut self, name: &str) -> Result<(), CatalogError> {
        add_vocab(&self.store, &self.manufacturers, name)?;
        self.manufacturers = load_vocab(&self.store)?;
        Ok(())
    }

    pub fn add_model(&mut self, name: &str) -> Result<(), CatalogError> {
        add_vocab(&self.store, &self.models, name)?;
        self.models = load_vocab(&self.store)?;
        Ok(())
    }

    pub fn add_flat_manufacturer(&mut self, name: &str) -> Result<(), CatalogError> {
        add_vocab(&self.store, &self.flat_manufacturers, name)?;
        self.flat_manufacturers = load_vocab(&self.store)?;
        Ok(())
    }

    pub fn add_flat_model(&mut self, name: &str) -> Result<(), CatalogError> {
        add_vocab(&self.store, &self.flat_models, name)?;
        self.flat_models = load_vocab(&self.store)?;
        Ok(())
    }

    /// Delete a manufacturer row. Rides referencing it keep the dangling
    /// name, matching the settings-screen behavior.
    pub fn delete_manufacturer(&mut self, name: &str) -> Result<bool, CatalogError> {
        let existed = delete_vocab::<S, Manufacturer>(&self.store, &self.manufacturers, name)?;
        self.manufacturers = load_vocab(&self.store)?;
        Ok(existed)
    }

    pub fn delete_model(&mut self, name: &str) -> Result<bool, CatalogError> {
        let existed = delete_vocab::<S, RideModel>(&self.store, &self.models, name)?;
        self.models = load_vocab(&self.store)?;
        Ok(existed)
    }

    pub fn delete_flat_manufacturer(&mut self, name: &str) -> Result<bool, CatalogError> {
        let existed = delete_vocab::<S, FlatManufacturer>(&self.store, &self.flat_manufacturers, name)?;
        self.flat_manufacturers = load_vocab(&self.store)?;
        Ok(existed)
    }

    pub fn delete_flat_model(&mut self, name: &str) -> Result<bool, CatalogError> {
        let existed = delete_vocab::<S, FlatRideModel>(&self.store, &self.flat_models, name)?;
        self.flat_models = load_vocab(&self.store)?;
        Ok(existed)
    }

    /// How many coasters reference a manufacturer.
    pub fn manufacturer_usage(&self, name: &str) -> usize {
        self.coasters.iter().filter(|c| c.manufacturer == name).count()
    }

    pub fn model_usage(&self, name: &str) -> usize {
        self.coasters.iter().filter(|c| c.model() == Some(name)).count()
    }

    pub fn flat_manufacturer_usage(&self, name: &str) -> usize {
        self.flats.iter().filter(|f| f.manufacturer == name).count()
    }

    pub fn flat_model_usage(&self, name: &str) -> usize {
        self.flats.iter().filter(|f| f.model() == Some(name)).count()
    }

    // ------------------------------------------------------------------
    // Backup
    // ------------------------------------------------------------------

    /// Snapshot every collection for export.
    pub fn export(&self) -> Result<Snapshot, CatalogError> {
        Ok(backup::export(&self.store)?)
    }

    /// Import a JSON backup: parse first (malformed payloads leave the
    /// store untouched), upsert every row verbatim in one transaction,
    /// then rebuild the catalog from the store.
    pub fn import_json(&mut self, json: &str) -> Result<ImportSummary, CatalogError> {
        let summary = backup::import(&self.store, json)?;
        self.load()?;
        Ok(summary)
    }

    // ------------------------------------------------------------------
    // Resynchronization
    // ------------------------------------------------------------------

    fn resync_coasters<T>(&mut self, result: Result<T, StoreError>) -> Result<T, CatalogError> {
        if result.is_err() {
            warn!("coasters: reloading after failed operation");
        }
        self.coasters = engine::load(&self.store)?;
        Ok(result?)
    }

    fn resync_flats<T>(&mut self, result: Result<T, StoreError>) -> Result<T, CatalogError> {
        if result.is_err() {
            warn!("flats: reloading after failed operation");
        }
        self.flats = engine::load(&self.store)?;
        Ok(result?)
    }

    fn resync_parks<T>(&mut self, result: Result<T, StoreError>) -> Result<T, CatalogError> {
        if result.is_err() {
            warn!("parks: reloading after failed operation");
        }
        self.parks = engine::load(&self.store)?;
        Ok(result?)
    }
}

/// Fetch a vocabulary collection sorted by name, seeding its sentinel row
/// first if absent (the collection is re-fetched after seeding).
fn load_vocab<S: RecordStore, V: VocabRecord>(store: &S) -> Result<Vec<V>, StoreError> {
    let mut rows: Vec<V> = store.get_all()?;
    if !rows.iter().any(|v| v.name() == V::SENTINEL_NAME) {
        info!("{}: seeding reserved row '{}'", V::COLLECTION, V::SENTINEL_NAME);
        store.put(&V::sentinel())?;
        rows = store.get_all()?;
    }
    rows.sort_by(|a, b| a.name().cmp(b.name()));
    Ok(rows)
}

fn add_vocab<S: RecordStore, V: VocabRecord>(
    store: &S,
    existing: &[V],
    name: &str,
) -> Result<(), CatalogError> {
    if existing.iter().any(|v| v.name() == name) {
        return Err(CatalogError::DuplicateKey {
            collection: V::COLLECTION,
            key: name.to_string(),
        });
    }
    store.put(&V::new(name))?;
    Ok(())
}

fn delete_vocab<S: RecordStore, V: VocabRecord>(
    store: &S,
    existing: &[V],
    name: &str,
) -> Result<bool, CatalogError> {
    if existing
        .iter()
        .any(|v| v.name() == name && v.is_reserved())
    {
        return Err(CatalogError::ReservedRow {
            collection: V::COLLECTION,
            key: name.to_string(),
        });
    }
    Ok(store.delete::<V>(&RecordKey::from(name))?)
}

/// Tag sentinel rows persisted before the reserved flag existed.
fn tag_legacy_sentinels<S: RecordStore, V: VocabRecord>(
    tx: &mut crate::store::Transaction<'_, S>,
    rows: &mut [V],
) -> Result<bool, StoreError> {
    let mut touched = false;
    for row in rows.iter_mut() {
        if row.name() == V::SENTINEL_NAME && !row.is_reserved() {
            *row = V::sentinel();
            tx.put(row)?;
            touched = true;
        }
    }
    Ok(touched)
}
