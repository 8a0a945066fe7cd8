use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::data::analysis::{filter_by_hour, hour_histogram};
use crate::data::cache::LoadCache;
use crate::data::loader;
use crate::data::model::{FilteredView, HourHistogram, PickupDataset};
use crate::data::synthetic;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Rows fetched from the remote source by default.
pub const DEFAULT_ROW_LIMIT: usize = 10_000;

/// Hour preselected on the filter slider.
pub const DEFAULT_HOUR: u32 = 17;

/// The full UI state, independent of rendering. Owns the process-scoped
/// pieces: the load cache and the run counter.
pub struct AppState {
    /// Completed loads keyed by row limit.
    pub cache: LoadCache,

    /// Currently displayed dataset (None until the first load).
    pub dataset: Option<Arc<PickupDataset>>,

    /// Row limit for the next load.
    pub row_limit: usize,

    /// Hour selected on the slider.
    pub hour_filter: u32,

    /// Histogram of the current dataset (recomputed on load).
    pub histogram: Option<HourHistogram>,

    /// Pickups at `hour_filter` (recomputed on load and slider change).
    pub filtered: Option<FilteredView>,

    /// Date-picker selection.
    pub selected_date: NaiveDate,

    /// Selectbox choice, a dataset date rendered as text. None until the
    /// user picks one.
    pub selected_option: Option<String>,

    /// How many display cycles this session has run. Starts at 0, bumped
    /// once at startup and once per "Run it again" press. Not persisted.
    pub run_counter: u64,

    /// Illustrative density-layer points, fixed for the session.
    pub synthetic_points: Vec<[f64; 2]>,

    /// Whether the synthetic layer is drawn.
    pub show_synthetic: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a load is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cache: LoadCache::default(),
            dataset: None,
            row_limit: DEFAULT_ROW_LIMIT,
            hour_filter: DEFAULT_HOUR,
            histogram: None,
            filtered: None,
            selected_date: NaiveDate::from_ymd_opt(2019, 7, 6).unwrap_or_default(),
            selected_option: None,
            run_counter: 0,
            synthetic_points: synthetic::synthetic_points(1000, synthetic::NYC_CENTER, 42),
            show_synthetic: false,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and rebuild the derived views.
    pub fn set_dataset(&mut self, dataset: Arc<PickupDataset>) {
        self.histogram = Some(hour_histogram(&dataset));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
        self.refilter();
    }

    /// Load through the cache. Repeated loads with the same limit reuse the
    /// cached dataset without refetching; errors land in the status line.
    pub fn load_remote(&mut self) {
        self.loading = true;
        match self.cache.get_or_load(self.row_limit, loader::load_remote) {
            Ok(dataset) => {
                log::info!(
                    "loaded {} pickups (row limit {})",
                    dataset.len(),
                    self.row_limit
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("load failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.loading = false;
            }
        }
    }

    /// Load a local `.csv` / `.csv.gz` file. Replaces the remote data, so
    /// the per-limit cache is dropped first.
    pub fn load_local(&mut self, path: &Path) {
        self.loading = true;
        match loader::load_file(path, self.row_limit) {
            Ok(dataset) => {
                log::info!("loaded {} pickups from {}", dataset.len(), path.display());
                self.cache.clear();
                self.set_dataset(Arc::new(dataset));
            }
            Err(e) => {
                log::error!("failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
            }
        }
    }

    /// Recompute the filtered view for the current slider hour.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            match filter_by_hour(ds, self.hour_filter as i32) {
                Ok(view) => self.filtered = Some(view),
                Err(e) => self.status_message = Some(format!("Error: {e}")),
            }
        }
    }

    /// Slider change: refilter only when the hour actually moved.
    pub fn set_hour(&mut self, hour: u32) {
        if hour != self.hour_filter {
            self.hour_filter = hour;
            self.refilter();
        }
    }

    /// One display cycle (startup or "Run it again").
    pub fn mark_run(&mut self) {
        self.run_counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;

    const SAMPLE: &str = "\
date/time,lat,lon,base
9/1/2014 5:10:00,40.1,-74.0,B02512
9/1/2014 17:02:00,40.2,-74.0,B02512
9/1/2014 17:45:00,40.3,-74.0,B02512
";

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        let ds = parse_csv(SAMPLE.as_bytes(), 100).unwrap();
        state.set_dataset(Arc::new(ds));
        state
    }

    #[test]
    fn set_dataset_rebuilds_derived_views() {
        let state = loaded_state();
        let hist = state.histogram.as_ref().unwrap();
        assert_eq!(hist.count(5), 1);
        assert_eq!(hist.count(17), 2);

        // Default slider hour is 17.
        let view = state.filtered.as_ref().unwrap();
        assert_eq!(view.hour, DEFAULT_HOUR);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn slider_change_refilters() {
        let mut state = loaded_state();
        state.set_hour(5);
        assert_eq!(state.filtered.as_ref().unwrap().indices, vec![0]);

        state.set_hour(3);
        assert!(state.filtered.as_ref().unwrap().is_empty());
    }

    #[test]
    fn run_counter_starts_at_zero_and_increments() {
        let mut state = AppState::default();
        assert_eq!(state.run_counter, 0);
        state.mark_run();
        state.mark_run();
        assert_eq!(state.run_counter, 2);
    }
}
