//! Domain - Row shapes for the tracked collections.
//!
//! Seven collections: coasters and flat rides (surrogate-keyed, ranked),
//! parks (name-keyed, ranked), and the four vocabulary collections
//! (name-keyed, unranked). Sentinel rows carry an explicit `reserved` flag
//! instead of being recognized by string comparison at every call site;
//! their canonical names live here and nowhere else.

mod coaster;
mod flat;
mod park;
mod vocab;

use crate::rank::Ranked;
use crate::store::Record;

/// Name of the reserved park that hosts rides without a specific park.
pub const UNRANKED_PARK: &str = "Otro";

/// Name of the reserved "unspecified" manufacturer row.
pub const UNKNOWN_MANUFACTURER: &str = "Desconocida";

/// Name of the reserved "unspecified" model row.
pub const UNKNOWN_MODEL: &str = "Desconocido";

/// Country code stored on the reserved park.
pub const OTHER_COUNTRY: &str = "OTHER";

/// Rank assigned to reserved ranked rows so they sort after every real row.
pub const SENTINEL_RANK: u32 = 9999;

/// Common surface of the two ride collections, so the rank engine, view
/// derivation, and renames run one implementation for coasters and flats.
pub trait Ride: Record + Ranked {
    fn park_name(&self) -> &str;
    fn set_park_name(&mut self, name: String);
    fn manufacturer(&self) -> &str;
    fn set_manufacturer(&mut self, name: String);
    fn model(&self) -> Option<&str>;
    fn set_model(&mut self, name: String);
    /// Country override for rides hosted by the reserved park.
    fn country(&self) -> Option<&str>;
    /// Numeric attribute used by the alternate sort mode (height, meters).
    fn metric(&self) -> Option<f64>;
}

/// Common surface of the four vocabulary collections.
pub trait VocabRecord: Record {
    /// Canonical name of this collection's reserved "unspecified" row.
    const SENTINEL_NAME: &'static str;

    fn name(&self) -> &str;
    fn is_reserved(&self) -> bool;
    /// The reserved sentinel row for this collection.
    fn sentinel() -> Self;
    fn new(name: &str) -> Self;
}

pub use coaster::Coaster;
pub use flat::FlatRide;
pub use park::Park;
pub use vocab::{FlatManufacturer, FlatRideModel, Manufacturer, RideModel};
