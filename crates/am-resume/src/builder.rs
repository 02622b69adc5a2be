use std::sync::LazyLock;

use am_types::{ProjectReport, ResumeItem};
use tracing::debug;

use crate::rules::{
    ActivityTypeRule, BulletRule, CodingLanguageRule, FallbackRule, GitCommitPercentageRule,
    GroupProjectRule, WeightedSkillsRule,
};

static DEFAULT_BUILDER: LazyLock<BulletPointBuilder> = LazyLock::new(BulletPointBuilder::new);

/// Shared builder with the standard rule order
pub fn default_builder() -> &'static BulletPointBuilder {
    &DEFAULT_BUILDER
}

/// Runs an ordered list of rules and concatenates their bullets.
///
/// When every rule is silent the fallback rule speaks instead, so
/// [`build`](Self::build) never returns an empty list.
pub struct BulletPointBuilder {
    rules: Vec<Box<dyn BulletRule>>,
    fallback: Box<dyn BulletRule>,
}

impl BulletPointBuilder {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(CodingLanguageRule),
                Box::new(WeightedSkillsRule),
                Box::new(GroupProjectRule),
                Box::new(GitCommitPercentageRule),
                Box::new(ActivityTypeRule),
            ],
            fallback: Box::new(FallbackRule),
        }
    }

    /// Builder with a custom rule list and the standard fallback
    pub fn with_rules(rules: Vec<Box<dyn BulletRule>>) -> Self {
        Self {
            rules,
            fallback: Box::new(FallbackRule),
        }
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn build(&self, report: &ProjectReport) -> Vec<String> {
        let mut bullets = Vec::new();
        for rule in &self.rules {
            let produced = rule.generate(report);
            debug!(rule = rule.name(), count = produced.len(), "Bullet rule applied");
            bullets.extend(produced.into_iter().filter(|b| !b.is_empty()));
        }

        if bullets.is_empty() {
            return self.fallback.generate(report);
        }
        bullets
    }

    /// Résumé entry for a project: title, bullets, frameworks and dates
    pub fn resume_item(&self, report: &ProjectReport) -> ResumeItem {
        ResumeItem {
            title: report.name.clone(),
            bullet_points: self.build(report),
            frameworks: report.frameworks().to_vec(),
            start_date: report.start_date(),
            end_date: report.end_date(),
        }
    }
}

impl Default for BulletPointBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use am_types::{ProjectStat, StatValue, StatisticIndex};

    struct Silent;

    impl BulletRule for Silent {
        fn generate(&self, _report: &ProjectReport) -> Vec<String> {
            Vec::new()
        }

        fn name(&self) -> &str {
            "silent"
        }
    }

    #[test]
    fn test_standard_rule_order() {
        assert_eq!(
            BulletPointBuilder::new().rule_names(),
            vec![
                "coding_language",
                "weighted_skills",
                "group_project",
                "git_commit_percentage",
                "activity_type"
            ]
        );
    }

    #[test]
    fn test_empty_statistics_fall_back() {
        let report = ProjectReport::from_statistics("quiet", StatisticIndex::new());
        assert_eq!(
            default_builder().build(&report),
            vec!["I contributed and worked on the project quiet"]
        );
        assert_eq!(
            BulletPointBuilder::with_rules(vec![Box::new(Silent)]).build(&report),
            vec!["I contributed and worked on the project quiet"]
        );
    }

    #[test]
    fn test_resume_item_carries_frameworks_and_title() {
        let mut stats = StatisticIndex::new();
        stats
            .insert(
                ProjectStat::ProjectFrameworks,
                StatValue::WeightedSkills(vec![am_types::WeightedSkill::new("flask", 1.0)]),
            )
            .unwrap();
        stats
            .insert(ProjectStat::IsGroupProject, StatValue::Boolean(false))
            .unwrap();
        let report = ProjectReport::from_statistics("api", stats);

        let item = default_builder().resume_item(&report);
        assert_eq!(item.title, "api");
        assert_eq!(item.frameworks.len(), 1);
        assert_eq!(
            item.bullet_points,
            vec!["I individually designed, developed, and led the project"]
        );
        assert!(item.start_date.is_none());
    }
}
