//! Natural-key renames.
//!
//! Renaming a park, manufacturer, or model replaces its storage key, so
//! every referencing ride row is rewritten in the same transaction that
//! swaps the old row for the new one. No row ever references a key whose
//! row is gone, assuming the transaction completes.

use log::{info, warn};

use super::{load_vocab, Catalog, CatalogError};
use crate::domain::{Park, Ride, VocabRecord};
use crate::rank::{self as engine, Ranked};
use crate::store::{Record, RecordKey, RecordStore};

impl<S: RecordStore> Catalog<S> {
    /// Rename a coaster manufacturer, rewriting every coaster that
    /// references it. Returns the number of rewritten coasters.
    pub fn rename_manufacturer(&mut self, old: &str, new: &str) -> Result<usize, CatalogError> {
        let result = rename_vocab_row(
            &self.store,
            &self.manufacturers,
            &mut self.coasters,
            old,
            new,
            |c| c.manufacturer() == old,
            |c| c.set_manufacturer(new.to_string()),
        );
        if result.is_err() {
            warn!("manufacturers: reloading after failed rename");
        }
        self.manufacturers = load_vocab(&self.store)?;
        self.coasters = engine::load(&self.store)?;
        result
    }

    /// Rename a coaster model; same contract as
    /// [`rename_manufacturer`](Catalog::rename_manufacturer).
    pub fn rename_model(&mut self, old: &str, new: &str) -> Result<usize, CatalogError> {
        let result = rename_vocab_row(
            &self.store,
            &self.models,
            &mut self.coasters,
            old,
            new,
            |c| c.model() == Some(old),
            |c| c.set_model(new.to_string()),
        );
        if result.is_err() {
            warn!("models: reloading after failed rename");
        }
        self.models = load_vocab(&self.store)?;
        self.coasters = engine::load(&self.store)?;
        result
    }

    pub fn rename_flat_manufacturer(&mut self, old: &str, new: &str) -> Result<usize, CatalogError> {
        let result = rename_vocab_row(
            &self.store,
            &self.flat_manufacturers,
            &mut self.flats,
            old,
            new,
            |f| f.manufacturer() == old,
            |f| f.set_manufacturer(new.to_string()),
        );
        if result.is_err() {
            warn!("flatManufacturers: reloading after failed rename");
        }
        self.flat_manufacturers = load_vocab(&self.store)?;
        self.flats = engine::load(&self.store)?;
        result
    }

    pub fn rename_flat_model(&mut self, old: &str, new: &str) -> Result<usize, CatalogError> {
        let result = rename_vocab_row(
            &self.store,
            &self.flat_models,
            &mut self.flats,
            old,
            new,
            |f| f.model() == Some(old),
            |f| f.set_model(new.to_string()),
        );
        if result.is_err() {
            warn!("flatModels: reloading after failed rename");
        }
        self.flat_models = load_vocab(&self.store)?;
        self.flats = engine::load(&self.store)?;
        result
    }

    /// Rename a park. One transaction rewrites every referencing coaster
    /// and flat and replaces the park row (carrying country, visit count,
    /// and rank forward); the replacement is then repositioned like a
    /// fresh insertion at its carried rank, so the ranking ends up dense
    /// with the renamed park where the old one was.
    pub fn rename_park(&mut self, old: &str, new: &str) -> Result<(), CatalogError> {
        let Some(park) = self.parks.iter().find(|p| p.name == old).cloned() else {
            return Err(CatalogError::UnknownKey {
                collection: Park::COLLECTION,
                key: old.to_string(),
            });
        };
        if park.reserved {
            return Err(CatalogError::ReservedRow {
                collection: Park::COLLECTION,
                key: old.to_string(),
            });
        }
        if self.parks.iter().any(|p| p.name == new) {
            return Err(CatalogError::DuplicateKey {
                collection: Park::COLLECTION,
                key: new.to_string(),
            });
        }

        let mut renamed = park;
        renamed.name = new.to_string();

        let result = self.apply_park_rename(old, renamed);
        if result.is_err() {
            warn!("parks: reloading after failed rename");
        }
        self.load()?;
        result
    }

    fn apply_park_rename(&mut self, old: &str, renamed: Park) -> Result<(), CatalogError> {
        let carried_rank = renamed.rank;

        let mut tx = self.store.transaction();
        let mut rewritten = 0;
        for coaster in self.coasters.iter_mut().filter(|c| c.park_name() == old) {
            coaster.set_park_name(renamed.name.clone());
            tx.put(coaster)?;
            rewritten += 1;
        }
        for flat in self.flats.iter_mut().filter(|f| f.park_name() == old) {
            flat.set_park_name(renamed.name.clone());
            tx.put(flat)?;
            rewritten += 1;
        }
        tx.delete::<Park>(&RecordKey::from(old));
        tx.put(&renamed)?;
        tx.commit()?;

        // The old row is gone; position the replacement like a new
        // insertion at the rank it carried.
        let mut working: Vec<Park> = self
            .parks
            .iter()
            .filter(|p| !p.is_reserved() && p.name != old)
            .cloned()
            .collect();
        let target = Some(carried_rank).filter(|rank| *rank >= 1);
        engine::insert_at_rank(&self.store, &mut working, renamed, target, true)?;

        info!(
            "parks: renamed '{}' ({} referencing rides rewritten)",
            old, rewritten
        );
        Ok(())
    }
}

/// Rewrite every ride referencing `old`, delete the old vocabulary row,
/// and insert the new one, all in one transaction.
#[allow(clippy::too_many_arguments)]
fn rename_vocab_row<S, V, R>(
    store: &S,
    vocab: &[V],
    rides: &mut [R],
    old: &str,
    new: &str,
    references: impl Fn(&R) -> bool,
    rewrite: impl Fn(&mut R),
) -> Result<usize, CatalogError>
where
    S: RecordStore,
    V: VocabRecord,
    R: Ride,
{
    let Some(row) = vocab.iter().find(|v| v.name() == old) else {
        return Err(CatalogError::UnknownKey {
            collection: V::COLLECTION,
            key: old.to_string(),
        });
    };
    if row.is_reserved() {
        return Err(CatalogError::ReservedRow {
            collection: V::COLLECTION,
            key: old.to_string(),
        });
    }
    if vocab.iter().any(|v| v.name() == new) {
        return Err(CatalogError::DuplicateKey {
            collection: V::COLLECTION,
            key: new.to_string(),
        });
    }

    let mut tx = store.transaction();
    let mut rewritten = 0;
    for ride in rides.iter_mut() {
        if references(ride) {
            rewrite(ride);
            tx.put(ride)?;
            rewritten += 1;
        }
    }
    tx.delete::<V>(&RecordKey::from(old));
    tx.put(&V::new(new))?;
    tx.commit()?;

    info!(
        "{}: renamed '{}' -> '{}' ({} rides rewritten)",
        V::COLLECTION,
        old,
        new,
        rewritten
    );
    Ok(rewritten)
}
