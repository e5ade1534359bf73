//! View - Filtered, re-sorted display lists derived from the ranked state.
//!
//! Derivation only: nothing here writes `rank`. Display numbering is
//! positional over the rows that pass the filter, so the visible ranking
//! is dense even while the persisted sequence carries gaps after a bulk
//! delete. Reorder controls are only meaningful when the displayed order
//! equals the full rank-ordered list, which [`reorder_enabled`] encodes.

use std::cmp::Ordering;

use crate::domain::{Park, Ride};
use crate::rank::Ranked;

/// Alternate sort for a ride list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Persisted rank order.
    #[default]
    Rank,
    /// Descending by the ride's numeric attribute (height); rides without
    /// one keep their relative order after all rides that have it.
    Metric,
}

/// Independent filter predicates over a ride list. Empty fields match
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RideFilter {
    pub park: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub country: Option<String>,
}

impl RideFilter {
    pub fn is_empty(&self) -> bool {
        self.park.is_none()
            && self.manufacturer.is_none()
            && self.model.is_none()
            && self.country.is_none()
    }

    fn matches<R: Ride>(&self, ride: &R, parks: &[Park]) -> bool {
        if let Some(park) = &self.park {
            if ride.park_name() != park {
                return false;
            }
        }
        if let Some(manufacturer) = &self.manufacturer {
            if ride.manufacturer() != manufacturer {
                return false;
            }
        }
        if let Some(model) = &self.model {
            if ride.model() != Some(model.as_str()) {
                return false;
            }
        }
        if let Some(country) = &self.country {
            if effective_country(ride, parks) != Some(country.as_str()) {
                return false;
            }
        }
        true
    }
}

/// One row of a derived display list.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEntry<'a, T> {
    /// Positional 1-based number shown to the user; counted over the rows
    /// that pass the filter, independent of the persisted rank.
    pub display_rank: usize,
    /// Index of the row in the source list, for wiring reorder controls.
    pub source_index: usize,
    pub item: &'a T,
}

/// Derive the display list for a ride collection.
pub fn display_rides<'a, R: Ride>(
    rides: &'a [R],
    parks: &[Park],
    filter: &RideFilter,
    sort: SortMode,
) -> Vec<DisplayEntry<'a, R>> {
    let mut ordered: Vec<(usize, &R)> = rides.iter().enumerate().collect();
    match sort {
        SortMode::Rank => ordered.sort_by_key(|(_, ride)| ride.rank()),
        SortMode::Metric => ordered.sort_by(|(_, a), (_, b)| match (a.metric(), b.metric()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        }),
    }

    let mut entries = Vec::new();
    for (source_index, ride) in ordered {
        if !filter.matches(ride, parks) {
            continue;
        }
        entries.push(DisplayEntry {
            display_rank: entries.len() + 1,
            source_index,
            item: ride,
        });
    }
    entries
}

/// The user-facing park ranking: reserved rows excluded, numbered
/// positionally.
pub fn ranked_parks(parks: &[Park]) -> Vec<DisplayEntry<'_, Park>> {
    let mut entries = Vec::new();
    for (source_index, park) in parks.iter().enumerate() {
        if park.is_reserved() {
            continue;
        }
        entries.push(DisplayEntry {
            display_rank: entries.len() + 1,
            source_index,
            item: park,
        });
    }
    entries
}

/// Whether swap-adjacent reorder controls may be shown: only when no
/// filter is active and the list is in rank order, because the swap
/// operates on raw list indices.
pub fn reorder_enabled(filter: &RideFilter, sort: SortMode) -> bool {
    filter.is_empty() && sort == SortMode::Rank
}

/// Country shown for a ride: its own override wins (rides hosted by the
/// reserved park carry one), otherwise the hosting park's country.
pub fn effective_country<'a, R: Ride>(ride: &'a R, parks: &'a [Park]) -> Option<&'a str> {
    if let Some(country) = ride.country() {
        return Some(country);
    }
    parks
        .iter()
        .find(|p| p.name == ride.park_name())
        .and_then(|p| p.country.as_deref())
}
