//! Error taxonomy for the attendance pipeline.

use crate::europarl::EuroparlApiError;

/// Failure while fetching or reshaping API data. Nothing is retried; the
/// first error aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Api(#[from] EuroparlApiError),

    /// A field the statistics depend on is present but unusable.
    #[error("unexpected data shape: {0}")]
    DataShape(String),
}

/// Failure while writing an output file.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
}
