use super::model::{FilteredView, HourHistogram, PickupDataset};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Hour histogram
// ---------------------------------------------------------------------------

/// Count pickups per hour of day. Deterministic; the bucket total equals
/// `dataset.len()`.
pub fn hour_histogram(dataset: &PickupDataset) -> HourHistogram {
    let mut buckets = [0u32; 24];
    for p in &dataset.pickups {
        buckets[p.hour() as usize] += 1;
    }
    HourHistogram { buckets }
}

// ---------------------------------------------------------------------------
// Hour filter
// ---------------------------------------------------------------------------

/// Return the pickups whose timestamp hour equals `hour`, preserving source
/// order. The range check happens before any row is examined.
pub fn filter_by_hour(dataset: &PickupDataset, hour: i32) -> Result<FilteredView, DataError> {
    if !(0..24).contains(&hour) {
        return Err(DataError::HourOutOfRange(hour));
    }
    let hour = hour as u32;

    let indices = dataset
        .pickups
        .iter()
        .enumerate()
        .filter(|(_, p)| p.hour() == hour)
        .map(|(i, _)| i)
        .collect();

    Ok(FilteredView { hour, indices })
}
