use std::fs::{self, Metadata};
use std::path::Path;

use am_git::GitRepo;
use am_types::{FileStat, StatValue, StatisticIndex};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{AnalyzerError, AnalyzerResult};

/// Size from the filesystem; dates from the path's commits when tracked,
/// otherwise from filesystem metadata
pub(crate) fn record(
    path: &Path,
    relative_path: &str,
    tracked_repo: Option<&GitRepo>,
    stats: &mut StatisticIndex,
) -> AnalyzerResult<()> {
    let metadata =
        fs::metadata(path).map_err(|e| AnalyzerError::io(path.display().to_string(), e))?;

    stats.insert(
        FileStat::FileSizeBytes,
        StatValue::Integer(i64::try_from(metadata.len()).unwrap_or(i64::MAX)),
    )?;

    let (created, modified) = tracked_repo
        .and_then(|repo| commit_dates(repo, relative_path))
        .unwrap_or_else(|| filesystem_dates(&metadata));

    stats.insert(FileStat::DateCreated, StatValue::Date(created))?;
    stats.insert(FileStat::DateModified, StatValue::Date(modified))?;
    Ok(())
}

/// Earliest and latest authored time of the commits touching a path
fn commit_dates(repo: &GitRepo, relative_path: &str) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let commits = match repo.commits_for_path(relative_path) {
        Ok(commits) => commits,
        Err(e) => {
            debug!(path = relative_path, error = %e, "Falling back to filesystem dates");
            return None;
        }
    };

    let first = commits.iter().map(|c| c.authored_at).min()?;
    let latest = commits.iter().map(|c| c.authored_at).max()?;
    Some((first, latest))
}

/// Extraction resets the birth time, so the access time stands in for
/// creation. It never runs past the modification time.
fn filesystem_dates(metadata: &Metadata) -> (DateTime<Utc>, DateTime<Utc>) {
    let modified = metadata
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());
    let accessed = metadata
        .accessed()
        .map(DateTime::<Utc>::from)
        .unwrap_or(modified);
    (accessed.min(modified), modified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use am_git::testing::TestRepo;
    use tempfile::TempDir;

    #[test]
    fn test_untracked_file_uses_metadata() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.bin");
        fs::write(&path, [0u8; 12]).unwrap();

        let mut stats = StatisticIndex::new();
        record(&path, "notes.bin", None, &mut stats).unwrap();

        assert_eq!(
            stats.get_value(FileStat::FileSizeBytes),
            Some(&StatValue::Integer(12))
        );
        let created = stats.get_value(FileStat::DateCreated).and_then(|v| v.as_date()).unwrap();
        let modified = stats.get_value(FileStat::DateModified).and_then(|v| v.as_date()).unwrap();
        assert!(created <= modified);
    }

    #[test]
    fn test_tracked_file_uses_commit_dates() {
        let fixture = TestRepo::new();
        fixture.commit_file("alice@x", "a.py", "x = 1\n", 1_700_000_000);
        fixture.commit_file("alice@x", "a.py", "x = 2\n", 1_700_086_400);
        let repo = fixture.open();

        let mut stats = StatisticIndex::new();
        record(&fixture.path().join("a.py"), "a.py", Some(&repo), &mut stats).unwrap();

        let created = stats.get_value(FileStat::DateCreated).and_then(|v| v.as_date()).unwrap();
        let modified = stats.get_value(FileStat::DateModified).and_then(|v| v.as_date()).unwrap();
        assert_eq!(created.timestamp(), 1_700_000_000);
        assert_eq!(modified.timestamp(), 1_700_086_400);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let mut stats = StatisticIndex::new();
        let err = record(&dir.path().join("gone.txt"), "gone.txt", None, &mut stats).unwrap_err();
        assert!(matches!(err, AnalyzerError::Io { .. }));
    }
}
