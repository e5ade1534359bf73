//! Park - A ranked park row, keyed by its name.

use serde::{Deserialize, Serialize};

use super::{OTHER_COUNTRY, SENTINEL_RANK, UNRANKED_PARK};
use crate::rank::Ranked;
use crate::store::{Record, RecordKey};

/// A park hosting zero or more rides. The reserved "no specific park" row
/// holds [`SENTINEL_RANK`] so it sorts after every real park, and is
/// excluded from the user-facing park ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Park {
    /// Natural key.
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, rename = "visitCount")]
    pub visit_count: u32,
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub reserved: bool,
}

impl Park {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            country: None,
            visit_count: 0,
            rank: 0,
            reserved: false,
        }
    }

    /// The reserved park that hosts rides without a specific park.
    pub fn unranked() -> Self {
        Self {
            name: UNRANKED_PARK.to_string(),
            country: Some(OTHER_COUNTRY.to_string()),
            visit_count: 0,
            rank: SENTINEL_RANK,
            reserved: true,
        }
    }
}

impl Record for Park {
    const COLLECTION: &'static str = "parks";

    fn key(&self) -> RecordKey {
        RecordKey::Name(self.name.clone())
    }
}

impl Ranked for Park {
    fn rank(&self) -> u32 {
        self.rank
    }

    fn set_rank(&mut self, rank: u32) {
        self.rank = rank;
    }

    fn is_reserved(&self) -> bool {
        self.reserved
    }
}
