use std::borrow::Cow;
use std::sync::Arc;

use am_analyzer::{
    extract_file_reports_parallel, extract_file_reports_with_repo, open_project_repo,
    AnalyzerConfig,
};
use am_types::{ProjectFiles, ProjectReport, UserReport};
use am_utils::{ProgressReporter, Stage};
use tracing::{info, instrument};

use crate::config::ReportConfig;
use crate::error::ReportResult;
use crate::project::ProjectAggregator;
use crate::user::UserAggregator;

/// Extraction settings carrying the report's email.
///
/// Blame shares, the author filter and the contribution statistics must
/// all see the same user, so a report email replaces the analyzer's.
pub fn aligned_analyzer_config<'c>(
    analyzer_config: &'c AnalyzerConfig,
    report_config: &ReportConfig,
) -> Cow<'c, AnalyzerConfig> {
    match &report_config.email {
        Some(email) if analyzer_config.email.as_ref() != Some(email) => {
            Cow::Owned(analyzer_config.clone().with_email(email.clone()))
        }
        _ => Cow::Borrowed(analyzer_config),
    }
}

/// Extracts and aggregates one project
#[instrument(skip_all, fields(project = %project.name))]
pub fn analyze_project(
    project: &ProjectFiles,
    analyzer_config: &AnalyzerConfig,
    report_config: &ReportConfig,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> ReportResult<ProjectReport> {
    let analyzer_config = aligned_analyzer_config(analyzer_config, report_config);
    let analyzer_config = analyzer_config.as_ref();
    let repo = open_project_repo(project);

    let file_reports = if analyzer_config.parallel {
        extract_file_reports_parallel(project, analyzer_config, progress)
    } else {
        extract_file_reports_with_repo(project, repo.as_ref(), analyzer_config, progress)
    };
    info!("Extracted {} file reports", file_reports.len());

    ProjectAggregator::new(report_config)
        .with_repo(repo.as_ref())
        .with_root(&project.root_path)
        .aggregate(&project.name, file_reports)
}

/// Runs every project through extraction and aggregation, then folds the
/// results into one portfolio
#[instrument(skip_all, fields(name = %name, projects = projects.len()))]
pub fn build_user_report(
    name: &str,
    projects: &[ProjectFiles],
    analyzer_config: &AnalyzerConfig,
    report_config: &ReportConfig,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> ReportResult<UserReport> {
    let mut project_reports = Vec::with_capacity(projects.len());
    for (idx, project) in projects.iter().enumerate() {
        project_reports.push(analyze_project(project, analyzer_config, report_config, None)?);
        if let Some(ref reporter) = progress {
            reporter.advance(Stage::Projects, &project.name, idx + 1, projects.len());
        }
    }

    let report = UserAggregator::new(report_config).aggregate(name, project_reports)?;
    if let Some(reporter) = progress {
        reporter.finish(
            Stage::Projects,
            &format!("{} projects aggregated", projects.len()),
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_email_reaches_analyzer() {
        let analyzer = AnalyzerConfig::default().parallel(true);
        let report = ReportConfig::default().with_email("alice@x");

        let aligned = aligned_analyzer_config(&analyzer, &report);
        assert_eq!(aligned.email.as_deref(), Some("alice@x"));
        assert!(aligned.parallel);

        let other = AnalyzerConfig::default().with_email("bob@x");
        assert_eq!(
            aligned_analyzer_config(&other, &report).email.as_deref(),
            Some("alice@x")
        );
    }

    #[test]
    fn test_matching_config_is_borrowed() {
        let analyzer = AnalyzerConfig::default().with_email("alice@x");
        let report = ReportConfig::default().with_email("alice@x");
        assert!(matches!(aligned_analyzer_config(&analyzer, &report), Cow::Borrowed(_)));

        let bare = AnalyzerConfig::default();
        assert!(matches!(
            aligned_analyzer_config(&bare, &ReportConfig::default()),
            Cow::Borrowed(_)
        ));
    }
}
