use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime, Timelike};

// ---------------------------------------------------------------------------
// Pickup – one row of the source table
// ---------------------------------------------------------------------------

/// A single pickup observation (one row of the source CSV).
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    /// Pickup time, parsed from the `date/time` column.
    pub timestamp: NaiveDateTime,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// TLC dispatch base code (e.g. `B02512`).
    pub base: String,
}

impl Pickup {
    /// Hour of day of the pickup, 0..=23.
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }
}

// ---------------------------------------------------------------------------
// PickupDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable after load; shared via `Arc` so the
/// load cache and the UI hold the same rows without copying.
#[derive(Debug, Clone)]
pub struct PickupDataset {
    /// All pickups, in file order.
    pub pickups: Vec<Pickup>,
    /// Header names after lower-casing, in file order.
    pub columns: Vec<String>,
    /// Distinct pickup dates, sorted. Drives the date selectbox.
    pub dates: BTreeSet<NaiveDate>,
}

impl PickupDataset {
    /// Build the date index from the loaded pickups.
    pub fn from_pickups(pickups: Vec<Pickup>, columns: Vec<String>) -> Self {
        let dates = pickups.iter().map(|p| p.timestamp.date()).collect();
        PickupDataset {
            pickups,
            columns,
            dates,
        }
    }

    /// Number of pickups.
    pub fn len(&self) -> usize {
        self.pickups.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }
}

// ---------------------------------------------------------------------------
// HourHistogram – pickups bucketed by hour of day
// ---------------------------------------------------------------------------

/// Pickup counts per hour of day. Always exactly 24 buckets, however sparse
/// the data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HourHistogram {
    pub buckets: [u32; 24],
}

impl HourHistogram {
    /// Count for one hour bucket.
    pub fn count(&self, hour: u32) -> u32 {
        self.buckets[(hour as usize).min(23)]
    }

    /// Sum over all buckets. Equals the length of the source dataset.
    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|&c| u64::from(c)).sum()
    }
}

// ---------------------------------------------------------------------------
// FilteredView – pickups at one hour of day
// ---------------------------------------------------------------------------

/// Indices of pickups whose timestamp hour equals `hour`, in source order.
/// Holding indices rather than copies keeps the view a subset of its source
/// by identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView {
    pub hour: u32,
    pub indices: Vec<usize>,
}

impl FilteredView {
    /// Number of matching pickups.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether no pickup matched.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate the matching pickups of `dataset` in source order.
    pub fn pickups<'a>(
        &'a self,
        dataset: &'a PickupDataset,
    ) -> impl Iterator<Item = &'a Pickup> + 'a {
        self.indices.iter().map(|&i| &dataset.pickups[i])
    }
}
