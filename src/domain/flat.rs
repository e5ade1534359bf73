//! FlatRide - A ranked flat ride row.

use serde::{Deserialize, Serialize};

use super::Ride;
use crate::rank::Ranked;
use crate::store::{Record, RecordKey};

/// A flat ride in the personal ranking. Structurally a coaster without a
/// height attribute, tracked in its own collection with its own
/// manufacturer/model vocabularies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRide {
    /// Surrogate id, 0 until first persisted.
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub park: String,
    #[serde(rename = "mfg")]
    pub manufacturer: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default, rename = "rideCount")]
    pub ride_count: u32,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub rank: u32,
}

impl FlatRide {
    pub fn new(name: &str, park: &str, manufacturer: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
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

impl Record for FlatRide {
    const COLLECTION: &'static str = "flats";

    fn key(&self) -> RecordKey {
        RecordKey::Id(self.id)
    }
}

impl Ranked for FlatRide {
    fn rank(&self) -> u32 {
        self.rank
    }

    fn set_rank(&mut self, rank: u32) {
        self.rank = rank;
    }
}

impl Ride for FlatRide {
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
        None
    }
}
