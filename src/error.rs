use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// Errors produced by the data pipeline. All of them propagate to the
/// caller; nothing is retried or locally recovered.
#[derive(Debug, Error)]
pub enum DataError {
    /// The remote source was unreachable or returned an unusable body.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// A cell could not be parsed. The whole load fails; there is no
    /// row-skipping recovery.
    #[error("row {row}, column '{column}': {reason}")]
    Parse {
        row: usize,
        column: String,
        reason: String,
    },

    /// A filter hour outside 0..=23 was requested.
    #[error("hour {0} is outside 0..=23")]
    HourOutOfRange(i32),
}
