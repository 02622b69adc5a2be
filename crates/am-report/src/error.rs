use am_types::StatError;
use thiserror::Error;

/// Failures that abort an aggregation.
///
/// Missing inputs never fail; the affected statistics are left out.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Statistic error: {0}")]
    Statistic(#[from] StatError),
}

/// Result type alias for aggregation
pub type ReportResult<T> = Result<T, ReportError>;
