//! Read-only git queries used for contribution attribution.
//!
//! A [`GitRepo`] wraps a `git2::Repository`, which is `Send` but not `Sync`.
//! Parallel callers open one handle per worker.

pub mod error;
pub mod repo;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::{GitError, GitResult};
pub use repo::{email_key, is_noreply_email, same_email, BlameHunkInfo, CommitInfo, GitRepo};
