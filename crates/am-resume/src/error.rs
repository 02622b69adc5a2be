use thiserror::Error;

/// Errors raised while formatting résumé content
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResumeError {
    #[error("fraction {0} is outside [0, 1]")]
    FractionOutOfRange(f64),
}

pub type ResumeResult<T> = Result<T, ResumeError>;
