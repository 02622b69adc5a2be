use std::path::Path;
use std::sync::LazyLock;

use am_types::{CodingLanguage, FileDomain, FileStat, StatValue, StatisticIndex};
use regex::Regex;

use crate::analyzer_trait::CodeMetrics;
use crate::error::AnalyzerResult;

static TEST_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[\W_])(test|tests|spec|specs|testing)(?:[\W_]|$)")
        .expect("valid regex literal")
});

const TEST_DIRECTORIES: &[&str] = &["test", "tests", "spec"];

/// Test when the filename carries a test token or a directory of the
/// project-relative path is a test directory
pub fn classify_domain(relative_path: &str) -> FileDomain {
    let path = Path::new(relative_path);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if TEST_FILE.is_match(&name) {
        return FileDomain::Test;
    }

    let in_test_dir = path.components().any(|c| {
        let part = c.as_os_str().to_string_lossy().to_lowercase();
        TEST_DIRECTORIES.contains(&part.as_str())
    });
    if in_test_dir {
        FileDomain::Test
    } else {
        FileDomain::Code
    }
}

pub(crate) fn record(relative_path: &str, stats: &mut StatisticIndex) -> AnalyzerResult<()> {
    stats.insert(
        FileStat::TypeOfFile,
        StatValue::FileDomain(classify_domain(relative_path)),
    )?;
    if let Some(language) = CodingLanguage::from_path(Path::new(relative_path)) {
        stats.insert(FileStat::CodingLanguage, StatValue::CodingLanguage(language))?;
    }
    Ok(())
}

/// Stores a language analyzer's counts
pub(crate) fn record_metrics(metrics: CodeMetrics, stats: &mut StatisticIndex) -> AnalyzerResult<()> {
    stats.insert(
        FileStat::NumberOfFunctions,
        StatValue::Integer(metrics.functions as i64),
    )?;
    stats.insert(
        FileStat::NumberOfClasses,
        StatValue::Integer(metrics.classes as i64),
    )?;
    if let Some(interfaces) = metrics.interfaces {
        stats.insert(
            FileStat::NumberOfInterfaces,
            StatValue::Integer(interfaces as i64),
        )?;
    }
    stats.insert(FileStat::ImportedPackages, StatValue::StringList(metrics.imports))?;
    Ok(())
}
