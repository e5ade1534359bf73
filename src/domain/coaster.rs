//! Coaster - A ranked roller coaster row.

use serde::{Deserialize, Serialize};

use super::Ride;
use crate::rank::Ranked;
use crate::store::{Record, RecordKey};

/// A roller coaster in the personal ranking.
///
/// Field names on the wire match the original backup format, so exports
/// from earlier revisions of the tracker import unchanged. Legacy rows may
/// lack `model` or `rank`; the loader repairs both on startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coaster {
    /// Surrogate id, 0 until first persisted.
    #[serde(default)]
    pub id: u64,
    pub name: String,
    /// Height in meters, used by the alternate sort mode.
    #[serde(default)]
    pub height: Option<f64>,
    /// Name of the hosting park.
    pub park: String,
    #[serde(rename = "mfg")]
    pub manufacturer: String,
    /// None on legacy rows; the loader migrates to the sentinel model.
    #[serde(default)]
    pub model: Option<String>,
    /// Photo as a data-URL.
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default, rename = "rideCount")]
    pub ride_count: u32,
    /// Country override, used when the hosting park is the reserved one.
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub rank: u32,
}

impl Coaster {
    pub fn new(name: &str, park: &str, manufacturer: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            height: None,
            park: park.to_string(),
            manufacturer: manufacturer.to_string(),
            model: None,
            photo: None,
            ride_count: 0,
            country: None,
            rank: 0,
        }
    }
}

impl Record for Coaster {
    const COLLECTION: &'static str = "coasters";

    fn key(&self) -> RecordKey {
        RecordKey::Id(self.id)
    }
}

impl Ranked for Coaster {
    fn rank(&self) -> u32 {
        self.rank
    }

    fn set_rank(&mut self, rank: u32) {
        self.rank = rank;
    }
}

impl Ride for Coaster {
    fn park_name(&self) -> &str {
        &self.park
    }

    fn set_park_name(&mut self, name: String) {
        self.park = name;
    }

    fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    fn set_manufacturer(&mut self, name: String) {
        self.manufacturer = name;
    }

    fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    fn set_model(&mut self, name: String) {
        self.model = Some(name);
    }

    fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    fn metric(&self) -> Option<f64> {
        self.height
    }
}
