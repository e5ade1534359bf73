//! Backup - Whole-store JSON snapshots for export and import.
//!
//! A snapshot bundles all seven collections. Import parses the full
//! payload before anything is written, so a malformed file never leaves
//! partial state; rows are then upserted verbatim across every collection
//! in one transaction. Rank values are imported as-is — a snapshot this
//! crate produced round-trips exactly, while a hand-edited payload with
//! inconsistent ranks is only healed by the next insert-at-rank.
//!
//! Field names match the original backup format, so exports from earlier
//! revisions of the tracker import unchanged (their `exportDate` string is
//! ignored).

use std::fmt;
use std::time::SystemTime;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Coaster, FlatManufacturer, FlatRide, FlatRideModel, Manufacturer, Park, RideModel,
};
use crate::media;
use crate::rank;
use crate::store::{RecordStore, StoreError};

/// Error type for backup operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupError {
    /// Malformed JSON payload; nothing was written.
    Parse(String),
    /// The store failed while reading or applying rows.
    Store(StoreError),
}

impl fmt::Display for BackupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupError::Parse(msg) => write!(f, "malformed backup payload: {}", msg),
            BackupError::Store(err) => write!(f, "backup store failure: {}", err),
        }
    }
}

impl std::error::Error for BackupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackupError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for BackupError {
    fn from(err: StoreError) -> Self {
        BackupError::Store(err)
    }
}

/// JSON-serializable snapshot of every collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub coasters: Vec<Coaster>,
    #[serde(default)]
    pub flats: Vec<FlatRide>,
    #[serde(default)]
    pub parks: Vec<Park>,
    #[serde(default)]
    pub manufacturers: Vec<Manufacturer>,
    #[serde(default)]
    pub models: Vec<RideModel>,
    #[serde(default, rename = "flatManufacturers")]
    pub flat_manufacturers: Vec<FlatManufacturer>,
    #[serde(default, rename = "flatModels")]
    pub flat_models: Vec<FlatRideModel>,
    #[serde(default, rename = "exportedAt", skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<SystemTime>,
}

/// Per-collection row counts of an applied import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub coasters: usize,
    pub flats: usize,
    pub parks: usize,
    pub vocabulary: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.coasters + self.flats + self.parks + self.vocabulary
    }
}

/// Snapshot every collection, ranked lists in rank order.
pub fn export<S: RecordStore>(store: &S) -> Result<Snapshot, StoreError> {
    Ok(Snapshot {
        coasters: rank::load(store)?,
        flats: rank::load(store)?,
        parks: rank::load(store)?,
        manufacturers: store.get_all()?,
        models: store.get_all()?,
        flat_manufacturers: store.get_all()?,
        flat_models: store.get_all()?,
        exported_at: Some(SystemTime::now()),
    })
}

/// Pretty-print a snapshot for writing to a backup file.
pub fn to_json(snapshot: &Snapshot) -> Result<String, BackupError> {
    serde_json::to_string_pretty(snapshot).map_err(|e| BackupError::Parse(e.to_string()))
}

/// Parse and apply a JSON backup. Rows are upserted verbatim; photo
/// fields that are not well-formed data-URLs are dropped with a warning.
pub fn import<S: RecordStore>(store: &S, json: &str) -> Result<ImportSummary, BackupError> {
    let mut snapshot: Snapshot =
        serde_json::from_str(json).map_err(|e| BackupError::Parse(e.to_string()))?;

    sanitize_photos(&mut snapshot);

    let mut tx = store.transaction();
    for coaster in &snapshot.coasters {
        tx.put(coaster)?;
    }
    for flat in &snapshot.flats {
        tx.put(flat)?;
    }
    for park in &snapshot.parks {
        tx.put(park)?;
    }
    for manufacturer in &snapshot.manufacturers {
        tx.put(manufacturer)?;
    }
    for model in &snapshot.models {
        tx.put(model)?;
    }
    for manufacturer in &snapshot.flat_manufacturers {
        tx.put(manufacturer)?;
    }
    for model in &snapshot.flat_models {
        tx.put(model)?;
    }
    tx.commit()?;

    let summary = ImportSummary {
        coasters: snapshot.coasters.len(),
        flats: snapshot.flats.len(),
        parks: snapshot.parks.len(),
        vocabulary: snapshot.manufacturers.len()
            + snapshot.models.len()
            + snapshot.flat_manufacturers.len()
            + snapshot.flat_models.len(),
    };
    info!("imported {} rows", summary.total());
    Ok(summary)
}

fn sanitize_photos(snapshot: &mut Snapshot) {
    let mut dropped = 0;
    for photo in snapshot
        .coasters
        .iter_mut()
        .map(|c| &mut c.photo)
        .chain(snapshot.flats.iter_mut().map(|f| &mut f.photo))
    {
        if let Some(url) = photo {
            if !media::is_data_url(url) {
                *photo = None;
                dropped += 1;
            }
        }
    }
    if dropped > 0 {
        warn!("dropped {} malformed photo fields from import", dropped);
    }
}
