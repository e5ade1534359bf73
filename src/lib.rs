//! coaster_top - Ranked-list tracker core for coasters, flat rides, and
//! parks.
//!
//! Each collection keeps a dense 1-based rank; the [`rank`] engine
//! preserves that invariant across adjacent swaps, explicit repositioning,
//! and bulk deletes, writing through one store [`Transaction`] per
//! operation. A [`Catalog`] owns the in-memory lists and reloads them from
//! the store after every mutation.

pub mod backup;
mod catalog;
mod domain;
mod media;
pub mod rank;
mod store;
pub mod view;

pub use backup::{BackupError, ImportSummary, Snapshot};
pub use catalog::{Catalog, CatalogError};
pub use domain::{
    Coaster, FlatManufacturer, FlatRide, FlatRideModel, Manufacturer, Park, Ride, RideModel,
    VocabRecord, OTHER_COUNTRY, SENTINEL_RANK, UNKNOWN_MANUFACTURER, UNKNOWN_MODEL, UNRANKED_PARK,
};
pub use media::{decode_data_url, encode_data_url, is_data_url};
pub use rank::{Direction, Ranked};
pub use store::{
    Batch, BatchEntry, BatchOp, InMemoryStore, Record, RecordKey, RecordStore, Records,
    RecordsExt, StoreError, Transaction,
};
