//! Maps imported packages and file paths to high-level skills.

mod indicators;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// High-level skill a project can demonstrate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    #[serde(rename = "Machine Learning")]
    MachineLearning,
    #[serde(rename = "Data Analytics")]
    DataAnalytics,
    #[serde(rename = "DevOps")]
    DevOps,
    #[serde(rename = "CI/CD")]
    CiCd,
    #[serde(rename = "Containerization")]
    Containerization,
    #[serde(rename = "Cloud Computing")]
    CloudComputing,
    #[serde(rename = "Database")]
    Database,
    #[serde(rename = "Testing")]
    Testing,
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "API Development")]
    ApiDevelopment,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "Security")]
    Security,
}

impl Skill {
    /// Lookup order; the first matching skill wins
    pub const ALL: &'static [Skill] = &[
        Skill::MachineLearning,
        Skill::DataAnalytics,
        Skill::DevOps,
        Skill::CiCd,
        Skill::Containerization,
        Skill::CloudComputing,
        Skill::Database,
        Skill::Testing,
        Skill::WebDevelopment,
        Skill::ApiDevelopment,
        Skill::MobileDevelopment,
        Skill::Security,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Skill::MachineLearning => "Machine Learning",
            Skill::DataAnalytics => "Data Analytics",
            Skill::DevOps => "DevOps",
            Skill::CiCd => "CI/CD",
            Skill::Containerization => "Containerization",
            Skill::CloudComputing => "Cloud Computing",
            Skill::Database => "Database",
            Skill::Testing => "Testing",
            Skill::WebDevelopment => "Web Development",
            Skill::ApiDevelopment => "API Development",
            Skill::MobileDevelopment => "Mobile Development",
            Skill::Security => "Security",
        }
    }

    pub fn indicator(self) -> &'static SkillIndicator {
        match self {
            Skill::MachineLearning => &indicators::MACHINE_LEARNING,
            Skill::DataAnalytics => &indicators::DATA_ANALYTICS,
            Skill::DevOps => &indicators::DEVOPS,
            Skill::CiCd => &indicators::CI_CD,
            Skill::Containerization => &indicators::CONTAINERIZATION,
            Skill::CloudComputing => &indicators::CLOUD_COMPUTING,
            Skill::Database => &indicators::DATABASE,
            Skill::Testing => &indicators::TESTING,
            Skill::WebDevelopment => &indicators::WEB_DEVELOPMENT,
            Skill::ApiDevelopment => &indicators::API_DEVELOPMENT,
            Skill::MobileDevelopment => &indicators::MOBILE_DEVELOPMENT,
            Skill::Security => &indicators::SECURITY,
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Evidence that a file or package exercises a skill.
///
/// `keywords` is carried for content scanning and is not consulted by the mapper.
#[derive(Debug, Clone, Copy)]
pub struct SkillIndicator {
    pub packages: &'static [&'static str],
    pub file_patterns: &'static [&'static str],
    pub file_extensions: &'static [&'static str],
    pub keywords: &'static [&'static str],
}

impl SkillIndicator {
    pub fn matches_package(&self, normalized: &str) -> bool {
        self.packages.contains(&normalized)
    }

    pub fn matches_extension(&self, extension: &str) -> bool {
        !extension.is_empty() && self.file_extensions.contains(&extension)
    }

    pub fn matches_any_pattern(&self, filepath: &str) -> bool {
        let filepath_lower = filepath.replace('\\', "/").to_lowercase();
        let filename = Path::new(&filepath_lower)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();

        self.file_patterns
            .iter()
            .any(|pattern| pattern_matches(pattern, &filename, &filepath_lower))
    }
}

fn pattern_matches(pattern: &str, filename: &str, filepath_lower: &str) -> bool {
    let pattern = pattern.to_lowercase();
    if pattern.contains('/') {
        let dir = pattern.replace('*', "");
        filepath_lower.contains(dir.trim_matches('/'))
    } else if let Some(suffix) = pattern.strip_prefix('*') {
        filename.ends_with(suffix)
    } else if let Some(prefix) = pattern.strip_suffix('*') {
        filename.starts_with(prefix)
    } else {
        filename == pattern
    }
}

/// Stateless lookups against the static indicator table
pub struct SkillMapper;

impl SkillMapper {
    /// Maps a package name such as `pandas` or `sklearn.linear_model`
    pub fn map_package_to_skill(package: &str) -> Option<Skill> {
        let normalized = package.split('.').next().unwrap_or("").to_lowercase();
        Skill::ALL
            .iter()
            .copied()
            .find(|skill| skill.indicator().matches_package(&normalized))
    }

    /// Maps a path relative to its project root
    pub fn map_filepath_to_skill(filepath: &str) -> Option<Skill> {
        let extension = Path::new(filepath)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();

        Skill::ALL.iter().copied().find(|skill| {
            let indicator = skill.indicator();
            indicator.matches_extension(&extension) || indicator.matches_any_pattern(filepath)
        })
    }
}
