use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use am_git::GitRepo;
use am_types::{FileReport, ProjectFiles};
use am_utils::{ProgressReporter, Stage};
use rayon::prelude::*;
use tracing::{debug, error, info, instrument};

use crate::config::AnalyzerConfig;
use crate::engine::get_appropriate_analyzer;
use crate::file_analyzer::AnalysisContext;

/// Opens the project's repository; failures downgrade to "no repository"
pub fn open_project_repo(project: &ProjectFiles) -> Option<GitRepo> {
    let repo_path = project.repo_path.as_deref()?;
    match GitRepo::open(repo_path) {
        Ok(repo) => Some(repo),
        Err(e) => {
            debug!(project = %project.name, error = %e, "Analyzing without git");
            None
        }
    }
}

/// Analyze every file of a project.
///
/// A missing project yields no reports. Files rejected by `should_include`
/// or failing analysis are left out; failures are logged.
pub fn extract_file_reports(
    project: Option<&ProjectFiles>,
    config: &AnalyzerConfig,
) -> Vec<FileReport> {
    let Some(project) = project else {
        return Vec::new();
    };

    if config.parallel {
        extract_file_reports_parallel(project, config, None)
    } else {
        let repo = open_project_repo(project);
        extract_file_reports_with_repo(project, repo.as_ref(), config, None)
    }
}

/// Sequential extraction against an already opened repository
#[instrument(skip_all, fields(project = %project.name))]
pub fn extract_file_reports_with_repo(
    project: &ProjectFiles,
    repo: Option<&GitRepo>,
    config: &AnalyzerConfig,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Vec<FileReport> {
    let total = project.file_paths.len();
    info!("Analyzing {} files", total);

    let reports: Vec<FileReport> = project
        .file_paths
        .iter()
        .enumerate()
        .filter_map(|(idx, relative_path)| {
            if let Some(ref reporter) = progress {
                reporter.advance(Stage::Files, relative_path, idx + 1, total);
            }
            analyze_file(project, relative_path, repo, config)
        })
        .collect();

    if let Some(reporter) = progress {
        reporter.finish(
            Stage::Files,
            &format!("{} of {} files reported", reports.len(), total),
        );
    }
    reports
}

/// Extraction on the rayon pool.
///
/// Each worker opens its own repository handle. Reports come back sorted
/// by path.
#[instrument(skip_all, fields(project = %project.name))]
pub fn extract_file_reports_parallel(
    project: &ProjectFiles,
    config: &AnalyzerConfig,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Vec<FileReport> {
    let total = project.file_paths.len();
    let done = AtomicUsize::new(0);
    info!("Analyzing {} files in parallel", total);

    let mut reports: Vec<FileReport> = project
        .file_paths
        .par_iter()
        .map_init(
            || open_project_repo(project),
            |repo, relative_path| {
                let report = analyze_file(project, relative_path, repo.as_ref(), config);
                if let Some(ref reporter) = progress {
                    let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                    reporter.advance(Stage::Files, relative_path, finished, total);
                }
                report
            },
        )
        .flatten()
        .collect();

    reports.sort_by(|a, b| a.filepath.cmp(&b.filepath));
    if let Some(reporter) = progress {
        reporter.finish(
            Stage::Files,
            &format!("{} of {} files reported", reports.len(), total),
        );
    }
    reports
}

fn analyze_file(
    project: &ProjectFiles,
    relative_path: &str,
    repo: Option<&GitRepo>,
    config: &AnalyzerConfig,
) -> Option<FileReport> {
    let ctx = AnalysisContext::new(&project.root_path, relative_path)
        .with_repo(repo)
        .with_email(config.email.as_deref())
        .with_language_filter(config.language_filter.as_deref());
    let analyzer = get_appropriate_analyzer(ctx);

    if !analyzer.should_include() {
        debug!(path = relative_path, "Excluded from analysis");
        return None;
    }

    match analyzer.analyze() {
        Ok(report) => Some(report),
        Err(e) => {
            error!(
                "Error analyzing file {} in {}: {}",
                relative_path, project.name, e
            );
            None
        }
    }
}
