//! Vocabulary rows - Manufacturer and model names, per ride collection.
//!
//! Coasters and flat rides keep separately namespaced vocabularies, so the
//! same row shape backs four collections. Vocabulary rows are not ranked.

use serde::{Deserialize, Serialize};

use super::{VocabRecord, UNKNOWN_MANUFACTURER, UNKNOWN_MODEL};
use crate::store::{Record, RecordKey};

macro_rules! vocab_record {
    ($(#[$meta:meta])* $name:ident, $collection:literal, $sentinel:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            /// Natural key.
            pub name: String,
            #[serde(default)]
            pub reserved: bool,
        }

        impl Record for $name {
            const COLLECTION: &'static str = $collection;

            fn key(&self) -> RecordKey {
                RecordKey::Name(self.name.clone())
            }
        }

        impl VocabRecord for $name {
            const SENTINEL_NAME: &'static str = $sentinel;

            fn name(&self) -> &str {
                &self.name
            }

            fn is_reserved(&self) -> bool {
                self.reserved
            }

            fn sentinel() -> Self {
                Self {
                    name: Self::SENTINEL_NAME.to_string(),
                    reserved: true,
                }
            }

            fn new(name: &str) -> Self {
                Self {
                    name: name.to_string(),
                    reserved: false,
                }
            }
        }
    };
}

vocab_record!(
    /// A coaster manufacturer.
    Manufacturer,
    "manufacturers",
    UNKNOWN_MANUFACTURER
);

vocab_record!(
    /// A coaster model.
    RideModel,
    "models",
    UNKNOWN_MODEL
);

vocab_record!(
    /// A flat-ride manufacturer.
    FlatManufacturer,
    "flatManufacturers",
    UNKNOWN_MANUFACTURER
);

vocab_record!(
    /// A flat-ride model.
    FlatRideModel,
    "flatModels",
    UNKNOWN_MODEL
);
