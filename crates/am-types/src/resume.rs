use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::language::WeightedSkill;

/// One project entry of a résumé
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResumeItem {
    pub title: String,
    pub bullet_points: Vec<String>,
    pub frameworks: Vec<WeightedSkill>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl ResumeItem {
    pub fn new(title: impl Into<String>, bullet_points: Vec<String>) -> Self {
        Self {
            title: title.into(),
            bullet_points,
            ..Default::default()
        }
    }
}
