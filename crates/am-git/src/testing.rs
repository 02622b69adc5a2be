//! Builds throwaway repositories with scripted authors and timestamps.

use std::fs;
use std::path::Path;

use git2::{Repository, Signature, Time};
use tempfile::TempDir;

use crate::repo::GitRepo;

pub struct TestRepo {
    dir: TempDir,
    repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let repo = Repository::init(dir.path()).expect("init repository");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn open(&self) -> GitRepo {
        GitRepo::open(self.dir.path()).expect("open fixture repository")
    }

    /// Writes a file without committing it
    pub fn write_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(path, content).expect("write fixture file");
    }

    /// Writes, stages, and commits a file as `email` at `seconds` since the epoch
    pub fn commit_file(&self, email: &str, relative_path: &str, content: &str, seconds: i64) {
        self.write_file(relative_path, content);

        let mut index = self.repo.index().expect("open index");
        index
            .add_path(Path::new(relative_path))
            .expect("stage file");
        index.write().expect("write index");
        let tree_id = index.write_tree().expect("write tree");
        let tree = self.repo.find_tree(tree_id).expect("find tree");

        let name = email.split('@').next().unwrap_or(email);
        let signature =
            Signature::new(name, email, &Time::new(seconds, 0)).expect("build signature");
        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();

        self.repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                &format!("update {relative_path}"),
                &tree,
                &parents,
            )
            .expect("commit");
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
