use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A discovered project: its root and the files to analyze
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFiles {
    pub name: String,
    pub root_path: PathBuf,
    /// Paths relative to `root_path`, `/`-separated
    pub file_paths: Vec<String>,
    /// Set when `root_path` is the working tree of a git repository
    pub repo_path: Option<PathBuf>,
}

impl ProjectFiles {
    pub fn new(name: impl Into<String>, root_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root_path: root_path.into(),
            file_paths: Vec::new(),
            repo_path: None,
        }
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_paths.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn with_repo(mut self, repo_path: impl Into<PathBuf>) -> Self {
        self.repo_path = Some(repo_path.into());
        self
    }
}
