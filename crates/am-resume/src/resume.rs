use std::fmt;

use am_types::{ProjectReport, ResumeItem, UserReport, WeightedSkill};
use serde::{Deserialize, Serialize};

use crate::builder::default_builder;
use crate::render::{ResumeRenderer, TextResumeRenderer};

/// Résumé assembled from a portfolio
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Resume {
    pub email: Option<String>,
    /// Skill names, strongest first
    pub skills: Vec<String>,
    pub items: Vec<ResumeItem>,
}

impl Resume {
    pub fn new(email: Option<String>, weighted_skills: &[WeightedSkill]) -> Self {
        let mut ranked = weighted_skills.to_vec();
        ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        Self {
            email,
            skills: ranked.into_iter().map(|s| s.skill_name).collect(),
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self, item: ResumeItem) {
        self.items.push(item);
    }

    pub fn add_skill(&mut self, skill: impl Into<String>) {
        self.skills.push(skill.into());
    }

    pub fn export(&self, renderer: &dyn ResumeRenderer) -> String {
        renderer.render(self)
    }
}

impl fmt::Display for Resume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.export(&TextResumeRenderer))
    }
}

/// Résumé entry built with the standard bullet rules
pub trait ProjectResumeExt {
    fn generate_resume_item(&self) -> ResumeItem;
}

impl ProjectResumeExt for ProjectReport {
    fn generate_resume_item(&self) -> ResumeItem {
        default_builder().resume_item(self)
    }
}

/// Résumé for a whole portfolio
pub trait UserResumeExt {
    fn generate_resume(&self, email: Option<&str>) -> Resume;
}

impl UserResumeExt for UserReport {
    fn generate_resume(&self, email: Option<&str>) -> Resume {
        let mut resume = Resume::new(email.map(str::to_string), self.skills());
        for item in &self.resume_items {
            resume.add_item(item.clone());
        }
        resume
    }
}
