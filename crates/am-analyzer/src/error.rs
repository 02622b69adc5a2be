use am_git::GitError;
use am_types::StatError;
use thiserror::Error;

/// Failure while analyzing a single file
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Statistic error: {0}")]
    Statistic(#[from] StatError),
}

impl AnalyzerError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        AnalyzerError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        AnalyzerError::Parse {
            file: file.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for analyzer operations
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
