use thiserror::Error;

use crate::statistic::{StatScope, ValueKind};

/// Errors raised while building or converting statistics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatError {
    #[error("statistic {name} expects a {expected} value but got {actual}")]
    TypeMismatch {
        name: &'static str,
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("unknown {scope} statistic: {name}")]
    UnknownStatistic { scope: StatScope, name: String },
}

/// Result type alias for statistic operations
pub type StatResult<T> = Result<T, StatError>;
