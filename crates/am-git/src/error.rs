use thiserror::Error;

/// Git integration errors
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a Git repository: {path}")]
    NotARepository {
        path: String,
        #[source]
        source: git2::Error,
    },

    #[error("Repository has no commits: {path}")]
    EmptyRepository { path: String },

    #[error("Path is not tracked at HEAD: {0}")]
    Untracked(String),

    #[error("Git repository error: {message}")]
    RepositoryError {
        message: String,
        #[source]
        source: git2::Error,
    },
}

/// Result type for Git operations
pub type GitResult<T> = Result<T, GitError>;

pub(crate) fn repo_error(message: impl Into<String>) -> impl FnOnce(git2::Error) -> GitError {
    let message = message.into();
    move |source| GitError::RepositoryError { message, source }
}
