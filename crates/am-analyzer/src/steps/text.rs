use std::fs;
use std::path::Path;

use am_git::{same_email, GitRepo};
use am_types::{round_to, FileStat, StatValue, StatisticIndex};
use encoding_rs::Encoding;
use tracing::{debug, warn};

use crate::error::{AnalyzerError, AnalyzerResult};

/// Reads a file as text, detecting its encoding when it is not UTF-8
pub fn read_text(path: &Path) -> AnalyzerResult<String> {
    let buffer = fs::read(path).map_err(|e| AnalyzerError::io(path.display().to_string(), e))?;

    if let Ok(text) = std::str::from_utf8(&buffer) {
        return Ok(text.to_string());
    }

    let (charset, confidence, _) = chardet::detect(&buffer);
    let encoding_name = charset.to_uppercase();
    if let Some(encoding) = Encoding::for_label(encoding_name.as_bytes()) {
        let (decoded, _, had_errors) = encoding.decode(&buffer);
        if !had_errors {
            debug!(path = %path.display(), encoding = %encoding_name, confidence, "Decoded non-UTF-8 text");
            return Ok(decoded.into_owned());
        }
    }

    warn!(
        "Encoding detection failed for {:?}, using lossy UTF-8",
        path
    );
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Number of `\n`-separated segments; an empty text is one segment
pub fn count_lines(text: &str) -> usize {
    text.split('\n').count()
}

/// Decodes the file, records its line count and the user's blame share,
/// and hands the text on to later steps
pub(crate) fn record(
    path: &Path,
    relative_path: &str,
    tracked_repo: Option<&GitRepo>,
    email: Option<&str>,
    stats: &mut StatisticIndex,
) -> AnalyzerResult<String> {
    let text = read_text(path)?;
    stats.insert(
        FileStat::LinesInFile,
        StatValue::Integer(count_lines(&text) as i64),
    )?;

    if let (Some(repo), Some(email)) = (tracked_repo, email) {
        if let Some(percent) = commit_percentage(repo, relative_path, email) {
            stats.insert(FileStat::PercentageLinesCommitted, StatValue::Float(percent))?;
        }
    }
    Ok(text)
}

/// Share of HEAD lines blamed on `email`, in percent with 2 decimals
fn commit_percentage(repo: &GitRepo, relative_path: &str, email: &str) -> Option<f64> {
    let hunks = match repo.blame(relative_path) {
        Ok(hunks) => hunks,
        Err(e) => {
            debug!(path = relative_path, error = %e, "Skipping commit percentage");
            return None;
        }
    };

    let total: usize = hunks.iter().map(|h| h.lines).sum();
    if total == 0 {
        return Some(0.0);
    }
    let authored: usize = hunks
        .iter()
        .filter(|h| same_email(&h.author_email, email))
        .map(|h| h.lines)
        .sum();
    Some(round_to(authored as f64 / total as f64 * 100.0, 2))
}
