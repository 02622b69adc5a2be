//! Bullet rules. Each rule reads a project's statistics and yields zero or
//! more non-empty bullet strings.

use am_types::{CodingLanguage, ProjectReport, ProjectStat, StatValue};
use tracing::debug;

use crate::format::{float_to_percent, format_float};

/// Languages below this share are not worth mentioning
const LANGUAGE_SHARE_THRESHOLD: f64 = 0.1;
/// Activity types at or below this share are left out
const ACTIVITY_SHARE_THRESHOLD: f64 = 0.05;
const TOP_SKILLS: usize = 3;

/// Trait for all bullet producers
pub trait BulletRule: Send + Sync {
    /// Bullets for the project; empty when the rule has nothing to say
    fn generate(&self, report: &ProjectReport) -> Vec<String>;

    /// Name of the rule
    fn name(&self) -> &str;
}

/// Languages making up at least 10% of the code
pub struct CodingLanguageRule;

impl BulletRule for CodingLanguageRule {
    fn generate(&self, report: &ProjectReport) -> Vec<String> {
        let Some(ratio) = report.language_ratio() else {
            return Vec::new();
        };
        if ratio.is_empty() {
            return Vec::new();
        }

        let significant: Vec<(CodingLanguage, f64)> = ratio
            .iter()
            .filter(|(_, share)| **share >= LANGUAGE_SHARE_THRESHOLD)
            .map(|(lang, share)| (*lang, *share))
            .collect();

        match significant.as_slice() {
            [] => vec!["Implemented code in small amounts of many programming languages".to_string()],
            [(lang, _)] => vec![format!("Project was coded using the {} language", lang)],
            _ => {
                // first language with the highest share
                let mut top = significant[0];
                for entry in &significant[1..] {
                    if entry.1 > top.1 {
                        top = *entry;
                    }
                }
                let others: Vec<&str> = significant
                    .iter()
                    .filter(|(lang, _)| *lang != top.0)
                    .map(|(lang, _)| lang.display_name())
                    .collect();
                vec![format!(
                    "Implemented code mainly in {} and also in {}",
                    top.0,
                    others.join(", ")
                )]
            }
        }
    }

    fn name(&self) -> &str {
        "coding_language"
    }
}

/// Top three demonstrated skills by weight
pub struct WeightedSkillsRule;

impl BulletRule for WeightedSkillsRule {
    fn generate(&self, report: &ProjectReport) -> Vec<String> {
        let mut skills = report.skills().to_vec();
        if skills.is_empty() {
            return Vec::new();
        }

        skills.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        let names: Vec<&str> = skills
            .iter()
            .take(TOP_SKILLS)
            .map(|s| s.skill_name.as_str())
            .collect();
        vec![format!("Utilized skills {}", names.join(", "))]
    }

    fn name(&self) -> &str {
        "weighted_skills"
    }
}

/// Team or solo framing from the authorship statistics
pub struct GroupProjectRule;

impl BulletRule for GroupProjectRule {
    fn generate(&self, report: &ProjectReport) -> Vec<String> {
        let is_group = report
            .get_value(ProjectStat::IsGroupProject)
            .and_then(StatValue::as_bool);

        match is_group {
            Some(true) => {
                let authors = report
                    .get_value(ProjectStat::TotalAuthors)
                    .and_then(StatValue::as_int)
                    .unwrap_or(0);
                if authors > 0 {
                    vec![format!("Collaborated in a team of {} contributors", authors - 1)]
                } else {
                    vec!["Collaborated with multiple contributors".to_string()]
                }
            }
            Some(false) => vec!["I individually designed, developed, and led the project".to_string()],
            None => Vec::new(),
        }
    }

    fn name(&self) -> &str {
        "group_project"
    }
}

/// Commit share and share of the final deliverable
pub struct GitCommitPercentageRule;

impl BulletRule for GitCommitPercentageRule {
    fn generate(&self, report: &ProjectReport) -> Vec<String> {
        let mut bullets = Vec::new();

        if let Some(pct) = report.user_commit_percentage() {
            bullets.push(format!("Authored {}% of commits", format_float(pct)));
        }

        if let Some(pct) = report
            .get_value(ProjectStat::TotalContributionPercentage)
            .and_then(StatValue::as_float)
        {
            bullets.push(format!(
                "Accounted for {}% of total contribution in the final deliverable",
                format_float(pct)
            ));
        }

        bullets
    }

    fn name(&self) -> &str {
        "git_commit_percentage"
    }
}

/// How the contribution splits across file domains
pub struct ActivityTypeRule;

impl BulletRule for ActivityTypeRule {
    fn generate(&self, report: &ProjectReport) -> Vec<String> {
        let Some(activity) = report
            .get_value(ProjectStat::ActivityTypeContributions)
            .and_then(StatValue::as_domain_ratio)
        else {
            return Vec::new();
        };

        let mut parts = Vec::new();
        for (domain, share) in activity {
            if *share <= ACTIVITY_SHARE_THRESHOLD {
                continue;
            }
            match float_to_percent(*share) {
                Ok(percent) => parts.push(format!("{percent} on {domain}")),
                Err(e) => debug!(domain = %domain, error = %e, "Skipping activity share"),
            }
        }

        if parts.is_empty() {
            return Vec::new();
        }
        vec![format!(
            "During the project, I split my contributions between following activity types: {}",
            parts.join(", ")
        )]
    }

    fn name(&self) -> &str {
        "activity_type"
    }
}

/// Used only when every other rule stays silent
pub struct FallbackRule;

impl BulletRule for FallbackRule {
    fn generate(&self, report: &ProjectReport) -> Vec<String> {
        vec![format!("I contributed and worked on the project {}", report.name)]
    }

    fn name(&self) -> &str {
        "fallback"
    }
}
