use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use git2::{BlameOptions, Commit, ObjectType, Oid, Repository, Sort, TreeWalkMode, TreeWalkResult};
use indexmap::IndexMap;
use tracing::debug;

use crate::error::{repo_error, GitError, GitResult};

const NOREPLY_SUFFIX: &str = "@users.noreply.github.com";

/// Synthetic GitHub senders that should not count as authors
pub fn is_noreply_email(email: &str) -> bool {
    email_key(email).ends_with(NOREPLY_SUFFIX)
}

/// Canonical form of an author email; addresses compare case-insensitively
pub fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn same_email(a: &str, b: &str) -> bool {
    email_key(a) == email_key(b)
}

/// Author metadata of one commit
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    pub id: String,
    pub author_email: String,
    pub authored_at: DateTime<Utc>,
}

/// Lines of the HEAD version of a file attributed to one author
#[derive(Debug, Clone, PartialEq)]
pub struct BlameHunkInfo {
    pub author_email: String,
    pub lines: usize,
}

/// Handle on a repository whose working tree is a project root
pub struct GitRepo {
    repo: Repository,
    workdir: PathBuf,
}

impl GitRepo {
    /// Opens the repository rooted exactly at `path`
    pub fn open(path: &Path) -> GitResult<Self> {
        let repo = Repository::open(path).map_err(|source| GitError::NotARepository {
            path: path.display().to_string(),
            source,
        })?;
        let workdir = repo
            .workdir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| path.to_path_buf());
        Ok(Self { repo, workdir })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn has_commits(&self) -> bool {
        self.head_commit().is_ok()
    }

    fn head_commit(&self) -> GitResult<Commit<'_>> {
        let head = self.repo.head().map_err(|_| GitError::EmptyRepository {
            path: self.workdir.display().to_string(),
        })?;
        head.peel_to_commit()
            .map_err(repo_error("Failed to resolve HEAD commit"))
    }

    /// Whether `relative_path` exists in the HEAD tree
    pub fn is_tracked(&self, relative_path: &str) -> bool {
        let Ok(commit) = self.head_commit() else {
            return false;
        };
        commit
            .tree()
            .and_then(|tree| tree.get_path(&normalize(relative_path)))
            .is_ok()
    }

    /// All commits reachable from HEAD, newest first
    pub fn all_commits(&self) -> GitResult<Vec<CommitInfo>> {
        self.walk_commits(|_| Ok(true))
    }

    /// Commits reachable from HEAD that changed `relative_path`, newest first
    pub fn commits_for_path(&self, relative_path: &str) -> GitResult<Vec<CommitInfo>> {
        let path = normalize(relative_path);
        self.walk_commits(|commit| Ok(touches_path(commit, &path)))
    }

    /// Whether any commit touching `relative_path` was authored by `email`
    pub fn has_author_commit(&self, relative_path: &str, email: &str) -> GitResult<bool> {
        Ok(self
            .commits_for_path(relative_path)?
            .iter()
            .any(|c| same_email(&c.author_email, email)))
    }

    /// Blame of the HEAD version of `relative_path`
    pub fn blame(&self, relative_path: &str) -> GitResult<Vec<BlameHunkInfo>> {
        let head = self.head_commit()?.id();
        let mut options = BlameOptions::new();
        options.newest_commit(head);

        let blame = self
            .repo
            .blame_file(&normalize(relative_path), Some(&mut options))
            .map_err(|_| GitError::Untracked(relative_path.to_string()))?;

        Ok(blame
            .iter()
            .map(|hunk| BlameHunkInfo {
                author_email: hunk.final_signature().email().unwrap_or("").to_string(),
                lines: hunk.lines_in_hunk(),
            })
            .collect())
    }

    /// Paths of every blob in the HEAD tree
    pub fn head_blob_paths(&self) -> GitResult<Vec<String>> {
        let tree = self
            .head_commit()?
            .tree()
            .map_err(repo_error("Failed to read HEAD tree"))?;

        let mut paths = Vec::new();
        tree.walk(TreeWalkMode::PreOrder, |root, entry| {
            if entry.kind() == Some(ObjectType::Blob) {
                if let Some(name) = entry.name() {
                    paths.push(format!("{root}{name}"));
                }
            }
            TreeWalkResult::Ok
        })
        .map_err(repo_error("Failed to walk HEAD tree"))?;
        Ok(paths)
    }

    /// Paths recorded in the index
    pub fn index_paths(&self) -> GitResult<Vec<String>> {
        let index = self
            .repo
            .index()
            .map_err(repo_error("Failed to read index"))?;
        Ok(index
            .iter()
            .map(|entry| String::from_utf8_lossy(&entry.path).into_owned())
            .collect())
    }

    /// Distinct author emails per HEAD blob
    pub fn authors_per_file(&self) -> GitResult<IndexMap<String, usize>> {
        let mut counts = IndexMap::new();
        for path in self.head_blob_paths()? {
            let authors: HashSet<String> = self
                .commits_for_path(&path)?
                .iter()
                .map(|c| email_key(&c.author_email))
                .collect();
            counts.insert(path, authors.len());
        }
        Ok(counts)
    }

    fn walk_commits<F>(&self, mut keep: F) -> GitResult<Vec<CommitInfo>>
    where
        F: FnMut(&Commit<'_>) -> GitResult<bool>,
    {
        if !self.has_commits() {
            debug!(path = %self.workdir.display(), "Repository has no commits");
            return Ok(Vec::new());
        }

        let mut walk = self
            .repo
            .revwalk()
            .map_err(repo_error("Failed to start revision walk"))?;
        walk.push_head()
            .map_err(repo_error("Failed to push HEAD"))?;
        walk.set_sorting(Sort::TIME)
            .map_err(repo_error("Failed to sort revision walk"))?;

        let mut commits = Vec::new();
        for oid in walk {
            let oid = oid.map_err(repo_error("Revision walk failed"))?;
            let commit = self
                .repo
                .find_commit(oid)
                .map_err(repo_error(format!("Failed to load commit {oid}")))?;
            if keep(&commit)? {
                commits.push(commit_info(&commit));
            }
        }
        Ok(commits)
    }
}

fn normalize(relative_path: &str) -> PathBuf {
    PathBuf::from(relative_path.replace('\\', "/"))
}

fn entry_id(commit: &Commit<'_>, path: &Path) -> Option<Oid> {
    commit
        .tree()
        .ok()
        .and_then(|tree| tree.get_path(path).ok())
        .map(|entry| entry.id())
}

/// A commit touches a path when its entry differs from every parent's
fn touches_path(commit: &Commit<'_>, path: &Path) -> bool {
    let current = entry_id(commit, path);
    if commit.parent_count() == 0 {
        return current.is_some();
    }
    commit
        .parents()
        .all(|parent| entry_id(&parent, path) != current)
}

fn commit_info(commit: &Commit<'_>) -> CommitInfo {
    let author = commit.author();
    CommitInfo {
        id: commit.id().to_string(),
        author_email: author.email().unwrap_or("").to_string(),
        authored_at: DateTime::<Utc>::from_timestamp(author.when().seconds(), 0)
            .unwrap_or_default(),
    }
}
