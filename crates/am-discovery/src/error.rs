use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Directory not found: {0}")]
    NotFound(String),

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl DiscoveryError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        DiscoveryError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

pub type DiscoveryResult<T> = Result<T, DiscoveryError>;
