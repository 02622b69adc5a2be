//! Plain-language summary of a portfolio.

use std::collections::BTreeSet;

use am_types::{StatValue, Statistic, UserReport, UserStat};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::config::ReportConfig;

/// `3/7/2024`
fn month_day_year(date: DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// `Mar 07, 2024`
fn short_date(date: DateTime<Utc>) -> String {
    date.format("%b %d, %Y").to_string()
}

/// `USER_START_DATE` becomes `User Start Date`
fn title_case(name: &str) -> String {
    name.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn display_value(value: &StatValue) -> String {
    match value {
        StatValue::Date(date) => month_day_year(*date),
        StatValue::Text(text) => text.clone(),
        other => other.to_json().to_string(),
    }
}

/// Renders a [`UserReport`] for people rather than storage
pub struct PortfolioPrinter<'a> {
    report: &'a UserReport,
    top_skills: usize,
}

impl<'a> PortfolioPrinter<'a> {
    pub fn new(report: &'a UserReport) -> Self {
        Self {
            report,
            top_skills: ReportConfig::default().top_skills,
        }
    }

    pub fn with_config(report: &'a UserReport, config: &ReportConfig) -> Self {
        Self {
            report,
            top_skills: config.top_skills,
        }
    }

    fn statistic_line(&self, stat: &Statistic) -> String {
        let template = stat.template();
        match (UserStat::by_name(template.name), stat.value()) {
            (Some(UserStat::UserStartDate), StatValue::Date(date)) => {
                format!("You started your first project on {}!", month_day_year(*date))
            }
            (Some(UserStat::UserEndDate), StatValue::Date(date)) => {
                format!("Your latest contribution was on {}.", month_day_year(*date))
            }
            (Some(UserStat::UserSkills), StatValue::WeightedSkills(skills)) => {
                let listed = if skills.is_empty() {
                    "an unknown set of skills".to_string()
                } else {
                    skills
                        .iter()
                        .take(self.top_skills)
                        .map(|s| s.skill_name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                format!("Your skills include: {listed}.")
            }
            (Some(UserStat::UserCodingLanguageRatio), StatValue::LanguageRatio(ratio)) => {
                let mut languages: Vec<_> = ratio.iter().collect();
                languages.sort_by(|a, b| b.1.total_cmp(a.1));
                let parts: Vec<String> = languages
                    .iter()
                    .map(|(lang, share)| format!("{} ({:.2}%)", lang, *share * 100.0))
                    .collect();
                format!("Your coding languages: {}.", parts.join(", "))
            }
            (_, value) => format!("{}: {}", title_case(template.name), display_value(value)),
        }
    }

    /// One line per statistic followed by the chronological sections
    pub fn to_user_readable_string(&self) -> String {
        if self.report.statistics.is_empty() {
            return "No user statistics are available yet.".to_string();
        }

        let mut lines: Vec<String> = self
            .report
            .statistics
            .iter()
            .map(|stat| self.statistic_line(stat))
            .collect();

        let projects = self.chronological_projects();
        if !projects.is_empty() {
            lines.push("\nProjects in chronological order:".to_string());
            lines.push(projects.join("\n"));
        }

        let skills = self.chronological_skills();
        if !skills.is_empty() {
            lines.push("\nSkills in chronological order:".to_string());
            lines.push(skills.join("\n"));
        }

        lines.join("\n")
    }

    /// Numbered projects, oldest start first; undated projects last
    pub fn chronological_projects(&self) -> Vec<String> {
        let mut dated = Vec::new();
        let mut undated = Vec::new();

        for project in &self.report.project_reports {
            let title = if project.name.is_empty() {
                "Untitled Project"
            } else {
                project.name.as_str()
            };
            let start = project.start_date();

            let mut line = match start {
                Some(date) => format!("{title} - Started {}", short_date(date)),
                None => format!("{title} - Start date unknown"),
            };
            match project.end_date() {
                Some(date) => line.push_str(&format!(" (Ended {})", short_date(date))),
                None => line.push_str(" (End date unknown)"),
            }

            match start {
                Some(date) => dated.push((date, line)),
                None => undated.push(line),
            }
        }

        dated.sort_by_key(|(date, _)| *date);
        dated
            .into_iter()
            .map(|(_, line)| line)
            .chain(undated)
            .enumerate()
            .map(|(i, line)| format!("{}. {}", i + 1, line))
            .collect()
    }

    /// Skills ordered by the earliest project start in which they appear;
    /// skills seen only in undated projects follow alphabetically
    pub fn chronological_skills(&self) -> Vec<String> {
        let mut first_seen: IndexMap<&str, Option<DateTime<Utc>>> = IndexMap::new();

        for project in &self.report.project_reports {
            let start = project.start_date();
            for skill in project.skills() {
                if skill.skill_name.is_empty() {
                    continue;
                }
                let entry = first_seen.entry(skill.skill_name.as_str()).or_insert(None);
                if let Some(date) = start {
                    if entry.map_or(true, |current| date < current) {
                        *entry = Some(date);
                    }
                }
            }
        }

        let mut dated: Vec<(&str, DateTime<Utc>)> = Vec::new();
        let mut undated: BTreeSet<&str> = BTreeSet::new();
        for (name, date) in first_seen {
            match date {
                Some(date) => dated.push((name, date)),
                None => {
                    undated.insert(name);
                }
            }
        }
        dated.sort_by_key(|(_, date)| *date);

        dated
            .into_iter()
            .map(|(name, date)| format!("{name} — First exercised {}", short_date(date)))
            .chain(
                undated
                    .into_iter()
                    .map(|name| format!("{name} — First exercised on an unknown date")),
            )
            .collect()
    }
}
