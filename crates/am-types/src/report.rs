use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::language::{CodingLanguage, FileDomain, WeightedSkill};
use crate::resume::ResumeItem;
use crate::statistic::{FileStat, ProjectStat, StatValue, StatisticIndex, UserStat};

/// Statistics extracted from one file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub filepath: String,
    pub statistics: StatisticIndex,
}

impl FileReport {
    pub fn new(filepath: impl Into<String>, statistics: StatisticIndex) -> Self {
        Self {
            filepath: filepath.into(),
            statistics,
        }
    }

    pub fn filename(&self) -> &str {
        Path::new(&self.filepath)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.filepath)
    }

    pub fn get_value(&self, stat: FileStat) -> Option<&StatValue> {
        self.statistics.get_value(stat)
    }

    pub fn lines(&self) -> Option<i64> {
        self.statistics
            .get_value(FileStat::LinesInFile)
            .and_then(|v| v.as_int())
    }

    pub fn size_bytes(&self) -> Option<i64> {
        self.statistics
            .get_value(FileStat::FileSizeBytes)
            .and_then(|v| v.as_int())
    }

    /// Size used for weighting: bytes, else lines, else 1
    pub fn weighted_size(&self) -> i64 {
        self.size_bytes().or_else(|| self.lines()).unwrap_or(1)
    }

    pub fn domain(&self) -> Option<FileDomain> {
        self.statistics
            .get_value(FileStat::TypeOfFile)
            .and_then(|v| v.as_file_domain())
    }

    pub fn language(&self) -> Option<CodingLanguage> {
        self.statistics
            .get_value(FileStat::CodingLanguage)
            .and_then(|v| v.as_language())
    }

    pub fn commit_percentage(&self) -> Option<f64> {
        self.statistics
            .get_value(FileStat::PercentageLinesCommitted)
            .and_then(|v| v.as_float())
    }

    pub fn imported_packages(&self) -> &[String] {
        self.statistics
            .get_value(FileStat::ImportedPackages)
            .and_then(|v| v.as_string_list())
            .unwrap_or(&[])
    }

    pub fn date_created(&self) -> Option<DateTime<Utc>> {
        self.statistics
            .get_value(FileStat::DateCreated)
            .and_then(|v| v.as_date())
    }

    pub fn date_modified(&self) -> Option<DateTime<Utc>> {
        self.statistics
            .get_value(FileStat::DateModified)
            .and_then(|v| v.as_date())
    }
}

/// Caps used to turn project signals into a weight in [0, 3]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectWeightConfig {
    pub lines_cap: f64,
    pub duration_days_cap: f64,
}

impl Default for ProjectWeightConfig {
    fn default() -> Self {
        Self {
            lines_cap: 500.0,
            duration_days_cap: 365.0,
        }
    }
}

/// Statistics aggregated over the files of one project
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectReport {
    pub name: String,
    pub root_path: String,
    pub file_reports: Vec<FileReport>,
    pub statistics: StatisticIndex,
}

impl ProjectReport {
    /// Rehydrates a stored report without recomputing its statistics
    pub fn from_statistics(name: impl Into<String>, statistics: StatisticIndex) -> Self {
        Self {
            name: name.into(),
            statistics,
            ..Default::default()
        }
    }

    pub fn get_value(&self, stat: ProjectStat) -> Option<&StatValue> {
        self.statistics.get_value(stat)
    }

    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.statistics
            .get_value(ProjectStat::ProjectStartDate)
            .and_then(|v| v.as_date())
    }

    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        self.statistics
            .get_value(ProjectStat::ProjectEndDate)
            .and_then(|v| v.as_date())
    }

    pub fn skills(&self) -> &[WeightedSkill] {
        self.statistics
            .get_value(ProjectStat::ProjectSkillsDemonstrated)
            .and_then(|v| v.as_weighted_skills())
            .unwrap_or(&[])
    }

    pub fn frameworks(&self) -> &[WeightedSkill] {
        self.statistics
            .get_value(ProjectStat::ProjectFrameworks)
            .and_then(|v| v.as_weighted_skills())
            .unwrap_or(&[])
    }

    pub fn language_ratio(&self) -> Option<&IndexMap<CodingLanguage, f64>> {
        self.statistics
            .get_value(ProjectStat::CodingLanguageRatio)
            .and_then(|v| v.as_language_ratio())
    }

    pub fn user_commit_percentage(&self) -> Option<f64> {
        self.statistics
            .get_value(ProjectStat::UserCommitPercentage)
            .and_then(|v| v.as_float())
    }

    pub fn total_lines(&self) -> i64 {
        self.file_reports.iter().filter_map(FileReport::lines).sum()
    }

    /// Sum of file sizes with the byte, line, 1 fallback
    pub fn total_size(&self) -> i64 {
        self.file_reports.iter().map(FileReport::weighted_size).sum()
    }

    pub fn get_project_weight(&self) -> f64 {
        self.weight_with(&ProjectWeightConfig::default())
    }

    /// Lines, duration, and commit share, each clamped to [0, 1] and summed
    pub fn weight_with(&self, config: &ProjectWeightConfig) -> f64 {
        let lines = (self.total_lines() as f64 / config.lines_cap).min(1.0);

        let duration = match (self.start_date(), self.end_date()) {
            (Some(start), Some(end)) => {
                let days = (end - start).num_days();
                if days > 0 {
                    (days as f64 / config.duration_days_cap).min(1.0)
                } else {
                    0.0
                }
            }
            _ => 0.0,
        };

        let contribution = self
            .user_commit_percentage()
            .map(|pct| (pct / 100.0).clamp(0.0, 1.0))
            .unwrap_or(0.0);

        lines + duration + contribution
    }
}

/// Portfolio-level statistics across projects
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserReport {
    pub name: String,
    pub project_reports: Vec<ProjectReport>,
    pub statistics: StatisticIndex,
    pub resume_items: Vec<ResumeItem>,
}

impl UserReport {
    /// Rehydrates a stored portfolio; résumé items are not rebuilt
    pub fn from_statistics(
        name: impl Into<String>,
        project_reports: Vec<ProjectReport>,
        statistics: StatisticIndex,
    ) -> Self {
        Self {
            name: name.into(),
            project_reports,
            statistics,
            resume_items: Vec::new(),
        }
    }

    pub fn get_value(&self, stat: UserStat) -> Option<&StatValue> {
        self.statistics.get_value(stat)
    }

    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.statistics
            .get_value(UserStat::UserStartDate)
            .and_then(|v| v.as_date())
    }

    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        self.statistics
            .get_value(UserStat::UserEndDate)
            .and_then(|v| v.as_date())
    }

    pub fn skills(&self) -> &[WeightedSkill] {
        self.statistics
            .get_value(UserStat::UserSkills)
            .and_then(|v| v.as_weighted_skills())
            .unwrap_or(&[])
    }

    pub fn language_ratio(&self) -> Option<&IndexMap<CodingLanguage, f64>> {
        self.statistics
            .get_value(UserStat::UserCodingLanguageRatio)
            .and_then(|v| v.as_language_ratio())
    }
}
