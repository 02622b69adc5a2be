use std::path::{Path, PathBuf};
use std::time::Instant;

use am_git::GitRepo;
use am_types::{CodingLanguage, FileReport, StatisticIndex};
use am_utils::{log_analysis_complete, log_analysis_start};
use tracing::{debug, instrument, warn};

use crate::analyzer_trait::LanguageAnalyzer;
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::kind::AnalyzerKind;
use crate::steps;

/// Where a file lives and who is asking about it
#[derive(Clone, Copy)]
pub struct AnalysisContext<'a> {
    /// Project root on disk
    pub root: &'a Path,
    /// Path below `root`, `/`-separated
    pub relative_path: &'a str,
    pub repo: Option<&'a GitRepo>,
    pub email: Option<&'a str>,
    pub language_filter: Option<&'a [String]>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(root: &'a Path, relative_path: &'a str) -> Self {
        Self {
            root,
            relative_path,
            repo: None,
            email: None,
            language_filter: None,
        }
    }

    pub fn with_repo(mut self, repo: Option<&'a GitRepo>) -> Self {
        self.repo = repo;
        self
    }

    pub fn with_email(mut self, email: Option<&'a str>) -> Self {
        self.email = email;
        self
    }

    pub fn with_language_filter(mut self, filter: Option<&'a [String]>) -> Self {
        self.language_filter = filter;
        self
    }

    pub fn absolute_path(&self) -> PathBuf {
        self.root.join(self.relative_path)
    }
}

/// One file bound to the pipeline chosen for it
pub struct FileAnalyzer<'a> {
    ctx: AnalysisContext<'a>,
    kind: AnalyzerKind,
    language: Option<&'a dyn LanguageAnalyzer>,
    tracked: bool,
}

impl<'a> FileAnalyzer<'a> {
    pub(crate) fn new(
        ctx: AnalysisContext<'a>,
        kind: AnalyzerKind,
        language: Option<&'a dyn LanguageAnalyzer>,
    ) -> Self {
        let tracked = ctx
            .repo
            .is_some_and(|repo| repo.is_tracked(ctx.relative_path));
        Self {
            ctx,
            kind,
            language,
            tracked,
        }
    }

    pub fn kind(&self) -> AnalyzerKind {
        self.kind
    }

    pub fn relative_path(&self) -> &str {
        self.ctx.relative_path
    }

    /// Whether the file exists in the repository's HEAD tree
    pub fn is_tracked(&self) -> bool {
        self.tracked
    }

    fn tracked_repo(&self) -> Option<&'a GitRepo> {
        if self.tracked {
            self.ctx.repo
        } else {
            None
        }
    }

    /// Cheap pre-check run before `analyze`.
    ///
    /// A non-empty language filter must name the file's language. A tracked
    /// file also needs a commit by the configured email.
    pub fn should_include(&self) -> bool {
        if let Some(filter) = self.ctx.language_filter {
            if !filter.is_empty() && !self.matches_language_filter(filter) {
                return false;
            }
        }

        let (Some(repo), Some(email)) = (self.tracked_repo(), self.ctx.email) else {
            return true;
        };

        match repo.has_author_commit(self.ctx.relative_path, email) {
            Ok(authored) => authored,
            Err(e) => {
                debug!(path = self.ctx.relative_path, error = %e, "Author lookup failed, keeping file");
                true
            }
        }
    }

    fn matches_language_filter(&self, filter: &[String]) -> bool {
        let Some(language) = CodingLanguage::from_path(Path::new(self.ctx.relative_path)) else {
            return false;
        };
        filter
            .iter()
            .filter_map(|name| CodingLanguage::from_display_name(name))
            .any(|wanted| wanted == language)
    }

    /// Run every step of the selected pipeline
    #[instrument(skip(self), fields(path = self.ctx.relative_path, kind = %self.kind))]
    pub fn analyze(&self) -> AnalyzerResult<FileReport> {
        let start_time = Instant::now();
        log_analysis_start!(self.ctx.relative_path);

        let path = self.ctx.absolute_path();
        let relative_path = self.ctx.relative_path;
        let tracked_repo = self.tracked_repo();
        let mut stats = StatisticIndex::new();

        steps::base::record(&path, relative_path, tracked_repo, &mut stats)?;

        if self.kind.is_text() {
            let text = steps::text::record(
                &path,
                relative_path,
                tracked_repo,
                self.ctx.email,
                &mut stats,
            )?;

            if self.kind == AnalyzerKind::NaturalLanguage {
                steps::natural::record(&text, &mut stats)?;
            } else if self.kind.is_code() {
                steps::code::record(relative_path, &mut stats)?;
                if let Some(language) = self.language {
                    match language.analyze_source(&path, &text) {
                        Ok(metrics) => steps::code::record_metrics(metrics, &mut stats)?,
                        Err(AnalyzerError::Parse { file, message }) => {
                            warn!(file = %file, "{message}; keeping common statistics");
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        log_analysis_complete!(
            relative_path,
            stats.len(),
            start_time.elapsed().as_millis() as u64
        );
        Ok(FileReport::new(relative_path, stats))
    }
}
