use am_resume::BulletPointBuilder;
use am_types::{
    CodingLanguage, ProjectReport, StatValue, StatisticIndex, UserReport, UserStat, WeightedSkill,
};
use am_utils::log_aggregation;
use indexmap::IndexMap;
use tracing::instrument;

use crate::config::ReportConfig;
use crate::error::ReportResult;
use crate::normalize::normalize_ratios;

/// Folds project reports into a portfolio
pub struct UserAggregator<'a> {
    config: &'a ReportConfig,
    builder: BulletPointBuilder,
}

impl<'a> UserAggregator<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self {
            config,
            builder: BulletPointBuilder::new(),
        }
    }

    pub fn with_builder(mut self, builder: BulletPointBuilder) -> Self {
        self.builder = builder;
        self
    }

    fn weight(&self, project: &ProjectReport) -> f64 {
        project.weight_with(&self.config.weight)
    }

    #[instrument(skip(self, project_reports), fields(projects = project_reports.len()))]
    pub fn aggregate(&self, name: &str, project_reports: Vec<ProjectReport>) -> ReportResult<UserReport> {
        let mut ranked: Vec<&ProjectReport> = project_reports.iter().collect();
        ranked.sort_by(|a, b| self.weight(b).total_cmp(&self.weight(a)));
        let resume_items = ranked
            .into_iter()
            .map(|project| self.builder.resume_item(project))
            .collect();

        let mut stats = StatisticIndex::new();
        date_range(&project_reports, &mut stats)?;
        self.language_ratio(&project_reports, &mut stats)?;
        self.weighted_skills(&project_reports, &mut stats)?;

        log_aggregation!("user", name, stats.len());

        Ok(UserReport {
            name: name.to_string(),
            project_reports,
            statistics: stats,
            resume_items,
        })
    }

    /// Project ratios scaled back to sizes, summed, and renormalized
    fn language_ratio(&self, projects: &[ProjectReport], stats: &mut StatisticIndex) -> ReportResult<()> {
        let mut bytes: IndexMap<CodingLanguage, f64> = IndexMap::new();
        for project in projects {
            let Some(ratio) = project.language_ratio() else {
                continue;
            };
            let total = project.total_size() as f64;
            for (language, share) in ratio {
                *bytes.entry(*language).or_insert(0.0) += share * total;
            }
        }

        if let Some(ratio) = normalize_ratios(&bytes, 4) {
            stats.insert(UserStat::UserCodingLanguageRatio, StatValue::LanguageRatio(ratio))?;
        }
        Ok(())
    }

    /// Skill weight times project weight, summed per skill
    fn weighted_skills(&self, projects: &[ProjectReport], stats: &mut StatisticIndex) -> ReportResult<()> {
        let mut totals: IndexMap<String, f64> = IndexMap::new();
        for project in projects {
            let project_weight = self.weight(project);
            for skill in project.skills() {
                *totals.entry(skill.skill_name.clone()).or_insert(0.0) += skill.weight * project_weight;
            }
        }

        let skills = totals
            .into_iter()
            .map(|(name, weight)| WeightedSkill::new(name, weight))
            .collect();
        stats.insert(UserStat::UserSkills, StatValue::WeightedSkills(skills))?;
        Ok(())
    }
}

fn date_range(projects: &[ProjectReport], stats: &mut StatisticIndex) -> ReportResult<()> {
    if let Some(start) = projects.iter().filter_map(ProjectReport::start_date).min() {
        stats.insert(UserStat::UserStartDate, StatValue::Date(start))?;
    }
    if let Some(end) = projects.iter().filter_map(ProjectReport::end_date).max() {
        stats.insert(UserStat::UserEndDate, StatValue::Date(end))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use am_types::{FileReport, FileStat, ProjectStat};
    use chrono::{TimeZone, Utc};

    fn sized_file(path: &str, bytes: i64, lines: i64) -> FileReport {
        let mut stats = StatisticIndex::new();
        stats.insert(FileStat::FileSizeBytes, StatValue::Integer(bytes)).unwrap();
        stats.insert(FileStat::LinesInFile, StatValue::Integer(lines)).unwrap();
        FileReport::new(path, stats)
    }

    fn project(name: &str, files: Vec<FileReport>, stats: &[(ProjectStat, StatValue)]) -> ProjectReport {
        let mut report = ProjectReport {
            name: name.to_string(),
            file_reports: files,
            ..Default::default()
        };
        for (stat, value) in stats {
            report.statistics.insert(*stat, value.clone()).unwrap();
        }
        report
    }

    fn ratio(entries: &[(CodingLanguage, f64)]) -> StatValue {
        StatValue::LanguageRatio(entries.iter().copied().collect())
    }

    #[test]
    fn test_language_ratio_weighs_projects_by_size() {
        let small = project(
            "small",
            vec![sized_file("a.py", 100, 10)],
            &[(ProjectStat::CodingLanguageRatio, ratio(&[(CodingLanguage::Python, 1.0)]))],
        );
        let large = project(
            "large",
            vec![sized_file("b.js", 300, 10)],
            &[(ProjectStat::CodingLanguageRatio, ratio(&[(CodingLanguage::Javascript, 1.0)]))],
        );

        let config = ReportConfig::default();
        let user = UserAggregator::new(&config)
            .aggregate("me", vec![small, large])
            .unwrap();
        let ratio = user.language_ratio().unwrap();
        assert_eq!(ratio[&CodingLanguage::Python], 0.25);
        assert_eq!(ratio[&CodingLanguage::Javascript], 0.75);
    }

    #[test]
    fn test_items_ranked_by_weight_and_skills_scaled() {
        // 500 lines saturates the line signal: weight 1.0 against 0.2
        let heavy = project(
            "heavy",
            vec![sized_file("a.py", 10, 500)],
            &[(
                ProjectStat::ProjectSkillsDemonstrated,
                StatValue::WeightedSkills(vec![WeightedSkill::new("Testing", 0.5)]),
            )],
        );
        let light = project(
            "light",
            vec![sized_file("b.py", 10, 100)],
            &[(
                ProjectStat::ProjectSkillsDemonstrated,
                StatValue::WeightedSkills(vec![
                    WeightedSkill::new("Testing", 1.0),
                    WeightedSkill::new("Database", 1.0),
                ]),
            )],
        );

        let config = ReportConfig::default();
        let user = UserAggregator::new(&config)
            .aggregate("me", vec![light, heavy])
            .unwrap();

        let titles: Vec<_> = user.resume_items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["heavy", "light"]);
        // stored projects keep their input order
        assert_eq!(user.project_reports[0].name, "light");

        let skills: Vec<(&str, f64)> = user
            .skills()
            .iter()
            .map(|s| (s.skill_name.as_str(), s.weight))
            .collect();
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].0, "Testing");
        assert!((skills[0].1 - 0.7).abs() < 1e-9);
        assert_eq!(skills[1].0, "Database");
        assert!((skills[1].1 - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_user_dates_span_projects() {
        let d = |y, m| Utc.with_ymd_and_hms(y, m, 1, 0, 0, 0).unwrap();
        let a = project(
            "a",
            Vec::new(),
            &[
                (ProjectStat::ProjectStartDate, StatValue::Date(d(2021, 5))),
                (ProjectStat::ProjectEndDate, StatValue::Date(d(2021, 9))),
            ],
        );
        let b = project(
            "b",
            Vec::new(),
            &[
                (ProjectStat::ProjectStartDate, StatValue::Date(d(2022, 1))),
                (ProjectStat::ProjectEndDate, StatValue::Date(d(2023, 2))),
            ],
        );

        let config = ReportConfig::default();
        let user = UserAggregator::new(&config).aggregate("me", vec![b, a]).unwrap();
        assert_eq!(user.start_date(), Some(d(2021, 5)));
        assert_eq!(user.end_date(), Some(d(2023, 2)));
        assert!(user.start_date() <= user.end_date());
    }

    #[test]
    fn test_projects_without_statistics() {
        let config = ReportConfig::default();
        let user = UserAggregator::new(&config)
            .aggregate("me", vec![ProjectReport::from_statistics("bare", StatisticIndex::new())])
            .unwrap();
        assert!(user.start_date().is_none());
        assert!(user.language_ratio().is_none());
        assert!(user.skills().is_empty());
        assert!(user.statistics.contains(UserStat::UserSkills));
        assert_eq!(
            user.resume_items[0].bullet_points,
            vec!["I contributed and worked on the project bare"]
        );
    }
}
