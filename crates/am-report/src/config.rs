use am_types::ProjectWeightConfig;
use serde::{Deserialize, Serialize};

/// Settings shared by the project and user aggregators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Enables blame-weighted contribution and commit-share statistics
    pub email: Option<String>,
    /// Caps used when ranking projects
    pub weight: ProjectWeightConfig,
    /// Skills listed in the readable portfolio summary
    pub top_skills: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            email: None,
            weight: ProjectWeightConfig::default(),
            top_skills: 15,
        }
    }
}

impl ReportConfig {
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
