/// Data layer: core types, loading, and derived views.
///
/// Architecture:
/// ```text
///  remote .csv.gz (or local file)
///        │
///        ▼
///   ┌──────────┐
///   │  fetch    │  HTTP GET + gunzip → raw CSV bytes
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  lower-case headers, parse timestamps → PickupDataset
///   └──────────┘
///        │                        (memoized per row limit by cache)
///        ▼
///   ┌──────────┐
///   │ analysis  │  hour histogram / hour filter → HourHistogram, FilteredView
///   └──────────┘
/// ```
pub mod analysis;
pub mod cache;
pub mod fetch;
pub mod loader;
pub mod model;
pub mod synthetic;
