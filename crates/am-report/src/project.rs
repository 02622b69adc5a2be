use std::collections::HashSet;
use std::fs;
use std::path::Path;

use am_git::{email_key, is_noreply_email, GitRepo};
use am_skills::SkillMapper;
use am_types::{
    round_to, CodingLanguage, FileDomain, FileReport, ProjectReport, ProjectStat, StatValue,
    StatisticIndex, WeightedSkill,
};
use am_utils::log_aggregation;
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use crate::config::ReportConfig;
use crate::error::ReportResult;
use crate::normalize::normalize_ratios;

/// Package names that never count as frameworks
const LOCAL_PACKAGES: &[&str] = &["app"];

/// Builds project statistics from the file reports of one project.
///
/// Steps run in a fixed order: dates, language ratio, skills and
/// frameworks, activity split, git authorship, project lines, total
/// contribution. A missing repository or email leaves the git-derived
/// statistics out.
pub struct ProjectAggregator<'a> {
    config: &'a ReportConfig,
    repo: Option<&'a GitRepo>,
    root_path: Option<&'a Path>,
}

impl<'a> ProjectAggregator<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self {
            config,
            repo: None,
            root_path: None,
        }
    }

    pub fn with_repo(mut self, repo: Option<&'a GitRepo>) -> Self {
        self.repo = repo;
        self
    }

    pub fn with_root(mut self, root_path: &'a Path) -> Self {
        self.root_path = Some(root_path);
        self
    }

    fn email(&self) -> Option<&str> {
        self.config.email.as_deref()
    }

    fn root(&self) -> Option<&Path> {
        self.root_path.or_else(|| self.repo.map(GitRepo::workdir))
    }

    #[instrument(skip(self, file_reports), fields(files = file_reports.len()))]
    pub fn aggregate(&self, name: &str, file_reports: Vec<FileReport>) -> ReportResult<ProjectReport> {
        let mut stats = StatisticIndex::new();

        self.date_range(&file_reports, &mut stats)?;
        self.language_ratio(&file_reports, &mut stats)?;
        self.weighted_skills(&file_reports, &mut stats)?;
        self.activity_contributions(&file_reports, &mut stats)?;
        self.git_authorship(&mut stats)?;
        self.project_lines(&file_reports, &mut stats)?;
        self.total_contribution(&file_reports, &mut stats)?;

        log_aggregation!("project", name, stats.len());

        Ok(ProjectReport {
            name: name.to_string(),
            root_path: self
                .root()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            file_reports,
            statistics: stats,
        })
    }

    fn date_range(&self, files: &[FileReport], stats: &mut StatisticIndex) -> ReportResult<()> {
        let start = files.iter().filter_map(FileReport::date_created).min();
        let end = files.iter().filter_map(FileReport::date_modified).max();

        if let Some(end) = end {
            stats.insert(ProjectStat::ProjectEndDate, StatValue::Date(end))?;
        }
        if let Some(start) = start {
            stats.insert(ProjectStat::ProjectStartDate, StatValue::Date(start))?;
        }
        Ok(())
    }

    /// Byte share per language. A repeated (file name, size) pair is
    /// counted once; paths mentioning `database` are visited last so the
    /// copy outside them wins.
    fn language_ratio(&self, files: &[FileReport], stats: &mut StatisticIndex) -> ReportResult<()> {
        let mut ordered: Vec<&FileReport> = files.iter().collect();
        ordered.sort_by_key(|r| (r.filepath.to_lowercase().contains("database"), r.filepath.clone()));

        let mut seen: HashSet<(String, i64)> = HashSet::new();
        let mut bytes: IndexMap<CodingLanguage, f64> = IndexMap::new();

        for report in ordered {
            let Some(language) = report.language() else {
                continue;
            };
            let size = report.weighted_size();

            let lowered = report.filepath.replace('\\', "/").to_lowercase();
            let filename = lowered.rsplit('/').next().unwrap_or("").to_string();
            if !seen.insert((filename, size)) {
                debug!(path = %report.filepath, "Skipping duplicate file in language ratio");
                continue;
            }

            *bytes.entry(language).or_insert(0.0) += size.max(1) as f64;
        }

        if let Some(ratio) = normalize_ratios(&bytes, 4) {
            stats.insert(ProjectStat::CodingLanguageRatio, StatValue::LanguageRatio(ratio))?;
        }
        Ok(())
    }

    /// Names of every directory below the project root
    fn sub_directories(&self) -> HashSet<String> {
        let Some(root) = self.root() else {
            return HashSet::new();
        };
        WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_dir())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect()
    }

    /// Skill and framework counters; each file counts at most once per key
    fn weighted_skills(&self, files: &[FileReport], stats: &mut StatisticIndex) -> ReportResult<()> {
        let local_dirs = self.sub_directories();
        let mut skills: IndexMap<String, usize> = IndexMap::new();
        let mut frameworks: IndexMap<String, usize> = IndexMap::new();

        for report in files {
            let mut file_skills: IndexSet<String> = IndexSet::new();
            let mut file_frameworks: IndexSet<String> = IndexSet::new();

            if let Some(skill) = SkillMapper::map_filepath_to_skill(&report.filepath) {
                file_skills.insert(skill.to_string());
            }

            for package in report.imported_packages() {
                if LOCAL_PACKAGES.contains(&package.as_str()) || local_dirs.contains(package) {
                    continue;
                }
                file_frameworks.insert(package.clone());
                if let Some(skill) = SkillMapper::map_package_to_skill(package) {
                    file_skills.insert(skill.to_string());
                }
            }

            for skill in file_skills {
                *skills.entry(skill).or_insert(0) += 1;
            }
            for framework in file_frameworks {
                *frameworks.entry(framework).or_insert(0) += 1;
            }
        }

        if let Some(weighted) = to_weighted(&skills) {
            stats.insert(ProjectStat::ProjectSkillsDemonstrated, StatValue::WeightedSkills(weighted))?;
        }
        if let Some(weighted) = to_weighted(&frameworks) {
            stats.insert(ProjectStat::ProjectFrameworks, StatValue::WeightedSkills(weighted))?;
        }
        Ok(())
    }

    /// Lines per file domain, scaled by the user's blame share when known
    fn activity_contributions(&self, files: &[FileReport], stats: &mut StatisticIndex) -> ReportResult<()> {
        let blame_weighted = self.repo.is_some() && self.email().is_some();
        let mut lines_by_domain: IndexMap<FileDomain, f64> = IndexMap::new();

        for report in files {
            let (Some(domain), Some(lines)) = (report.domain(), report.lines()) else {
                continue;
            };
            if lines == 0 {
                continue;
            }

            let share = if blame_weighted {
                report.commit_percentage().map(|pct| pct / 100.0).unwrap_or(1.0)
            } else {
                1.0
            };
            *lines_by_domain.entry(domain).or_insert(0.0) += lines as f64 * share;
        }

        if let Some(ratio) = normalize_ratios(&lines_by_domain, 5) {
            stats.insert(ProjectStat::ActivityTypeContributions, StatValue::DomainRatio(ratio))?;
        }
        Ok(())
    }

    fn git_authorship(&self, stats: &mut StatisticIndex) -> ReportResult<()> {
        let Some(repo) = self.repo else {
            return Ok(());
        };

        let commits = match repo.all_commits() {
            Ok(commits) => commits,
            Err(e) => {
                warn!(error = %e, "Could not read commit history");
                return Ok(());
            }
        };
        if commits.is_empty() {
            debug!("Repository has no commits, skipping authorship");
            return Ok(());
        }

        let mut commits_by_author: IndexMap<String, usize> = IndexMap::new();
        for commit in &commits {
            *commits_by_author.entry(email_key(&commit.author_email)).or_insert(0) += 1;
        }

        let total_authors = commits_by_author
            .keys()
            .filter(|email| !is_noreply_email(email))
            .count();
        let total_commits = commits.len();

        stats.insert(ProjectStat::IsGroupProject, StatValue::Boolean(total_authors > 1))?;
        stats.insert(ProjectStat::TotalAuthors, StatValue::Integer(total_authors as i64))?;

        match repo.authors_per_file() {
            Ok(counts) => {
                let counts = counts
                    .into_iter()
                    .map(|(path, n)| (path, n as i64))
                    .collect();
                stats.insert(ProjectStat::AuthorsPerFile, StatValue::PathCounts(counts))?;
            }
            Err(e) => warn!(error = %e, "Could not count authors per file"),
        }

        if let Some(email) = self.email() {
            if total_authors > 1 {
                let user_commits = commits_by_author.get(&email_key(email)).copied().unwrap_or(0);
                let pct = round_to(user_commits as f64 / total_commits as f64 * 100.0, 2);
                stats.insert(ProjectStat::UserCommitPercentage, StatValue::Float(pct))?;
            }
        }
        Ok(())
    }

    /// Lines of every indexed path on disk, or the sum over file reports
    /// when there is no repository
    fn project_lines(&self, files: &[FileReport], stats: &mut StatisticIndex) -> ReportResult<()> {
        let from_reports = || files.iter().filter_map(FileReport::lines).sum::<i64>() as f64;

        let total = match self.repo {
            Some(repo) => match repo.index_paths() {
                Ok(paths) => paths
                    .iter()
                    .filter_map(|path| fs::read(repo.workdir().join(path)).ok())
                    .map(|bytes| String::from_utf8_lossy(&bytes).split('\n').count() as f64)
                    .sum(),
                Err(e) => {
                    warn!(error = %e, "Could not read index, counting analyzed lines");
                    from_reports()
                }
            },
            None => from_reports(),
        };

        stats.insert(ProjectStat::TotalProjectLines, StatValue::Float(total))?;
        Ok(())
    }

    /// Blame-attributed lines as a share of all project lines
    fn total_contribution(&self, files: &[FileReport], stats: &mut StatisticIndex) -> ReportResult<()> {
        if self.repo.is_none() || self.email().is_none() {
            return Ok(());
        }

        let contributed = files
            .iter()
            .filter_map(|r| Some(r.lines()? as f64 * r.commit_percentage()? / 100.0))
            .fold(0.0, |acc, lines| acc + lines);
        let project_lines = stats
            .get_value(ProjectStat::TotalProjectLines)
            .and_then(StatValue::as_float)
            .unwrap_or(0.0);

        let pct = if project_lines == 0.0 {
            0.0
        } else {
            round_to(contributed / project_lines * 100.0, 2)
        };
        stats.insert(ProjectStat::TotalContributionPercentage, StatValue::Float(pct))?;
        Ok(())
    }
}

fn to_weighted(counts: &IndexMap<String, usize>) -> Option<Vec<WeightedSkill>> {
    let total: usize = counts.values().sum();
    if total == 0 {
        return None;
    }
    Some(
        counts
            .iter()
            .map(|(name, count)| WeightedSkill::new(name.clone(), *count as f64 / total as f64))
            .collect(),
    )
}
