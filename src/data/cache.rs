use std::collections::BTreeMap;
use std::sync::Arc;

use super::model::PickupDataset;
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Load cache – memoized loads keyed by row limit
// ---------------------------------------------------------------------------

/// Memo table for completed loads, keyed by row limit.
///
/// At most one successful load happens per distinct limit; a second call
/// with the same limit returns the cached dataset without refetching.
/// Failed loads are surfaced and not cached. Plain single-threaded state,
/// initialized empty at startup, never torn down.
#[derive(Debug, Default)]
pub struct LoadCache {
    entries: BTreeMap<usize, Arc<PickupDataset>>,
}

impl LoadCache {
    /// Return the cached dataset for `row_limit`, loading it with `load`
    /// on a miss.
    pub fn get_or_load<F>(
        &mut self,
        row_limit: usize,
        load: F,
    ) -> Result<Arc<PickupDataset>, DataError>
    where
        F: FnOnce(usize) -> Result<PickupDataset, DataError>,
    {
        if let Some(ds) = self.entries.get(&row_limit) {
            log::debug!("cache hit for row limit {row_limit}");
            return Ok(Arc::clone(ds));
        }
        let ds = Arc::new(load(row_limit)?);
        self.entries.insert(row_limit, Arc::clone(&ds));
        Ok(ds)
    }

    /// Number of distinct row limits cached.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget all cached loads. Used when a local file replaces the remote
    /// data, so stale remote rows cannot be served for an old limit.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;

    const SAMPLE: &str = "\
date/time,lat,lon,base
9/1/2014 0:01:00,40.1,-74.0,B02512
9/1/2014 5:10:00,40.2,-74.0,B02512
9/1/2014 17:02:00,40.3,-74.0,B02512
";

    #[test]
    fn loads_once_per_limit() {
        let mut cache = LoadCache::default();
        let mut calls = 0;

        for _ in 0..3 {
            let ds = cache
                .get_or_load(2, |limit| {
                    calls += 1;
                    parse_csv(SAMPLE.as_bytes(), limit)
                })
                .unwrap();
            assert_eq!(ds.len(), 2);
        }

        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn repeated_loads_share_the_same_dataset() {
        let mut cache = LoadCache::default();
        let first = cache
            .get_or_load(10, |limit| parse_csv(SAMPLE.as_bytes(), limit))
            .unwrap();
        let second = cache
            .get_or_load(10, |_| panic!("must not reload"))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn distinct_limits_load_separately() {
        let mut cache = LoadCache::default();
        let small = cache
            .get_or_load(1, |limit| parse_csv(SAMPLE.as_bytes(), limit))
            .unwrap();
        let large = cache
            .get_or_load(3, |limit| parse_csv(SAMPLE.as_bytes(), limit))
            .unwrap();
        assert_eq!(small.len(), 1);
        assert_eq!(large.len(), 3);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let mut cache = LoadCache::default();
        let bad = "date/time,lat,lon,base\nnot-a-date,40.1,-74.0,B02512\n";

        assert!(cache
            .get_or_load(5, |limit| parse_csv(bad.as_bytes(), limit))
            .is_err());
        assert!(cache.is_empty());

        // A later good load for the same limit goes through.
        let ds = cache
            .get_or_load(5, |limit| parse_csv(SAMPLE.as_bytes(), limit))
            .unwrap();
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut cache = LoadCache::default();
        cache
            .get_or_load(2, |limit| parse_csv(SAMPLE.as_bytes(), limit))
            .unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
