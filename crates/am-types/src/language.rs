use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Programming languages recognised by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodingLanguage {
    #[serde(rename = "Python")]
    Python,
    #[serde(rename = "Java")]
    Java,
    #[serde(rename = "Javascript")]
    Javascript,
    #[serde(rename = "Typescript")]
    Typescript,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C++")]
    Cpp,
    #[serde(rename = "C#")]
    CSharp,
    #[serde(rename = "Go")]
    Go,
    #[serde(rename = "Ruby")]
    Ruby,
    #[serde(rename = "PHP")]
    Php,
    #[serde(rename = "Rust")]
    Rust,
    #[serde(rename = "Swift")]
    Swift,
    #[serde(rename = "Kotlin")]
    Kotlin,
    #[serde(rename = "HTML")]
    Html,
    #[serde(rename = "CSS")]
    Css,
    #[serde(rename = "SQL")]
    Sql,
    #[serde(rename = "Shell")]
    Shell,
}

impl CodingLanguage {
    pub const ALL: &'static [CodingLanguage] = &[
        CodingLanguage::Python,
        CodingLanguage::Java,
        CodingLanguage::Javascript,
        CodingLanguage::Typescript,
        CodingLanguage::C,
        CodingLanguage::Cpp,
        CodingLanguage::CSharp,
        CodingLanguage::Go,
        CodingLanguage::Ruby,
        CodingLanguage::Php,
        CodingLanguage::Rust,
        CodingLanguage::Swift,
        CodingLanguage::Kotlin,
        CodingLanguage::Html,
        CodingLanguage::Css,
        CodingLanguage::Sql,
        CodingLanguage::Shell,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            CodingLanguage::Python => "Python",
            CodingLanguage::Java => "Java",
            CodingLanguage::Javascript => "Javascript",
            CodingLanguage::Typescript => "Typescript",
            CodingLanguage::C => "C",
            CodingLanguage::Cpp => "C++",
            CodingLanguage::CSharp => "C#",
            CodingLanguage::Go => "Go",
            CodingLanguage::Ruby => "Ruby",
            CodingLanguage::Php => "PHP",
            CodingLanguage::Rust => "Rust",
            CodingLanguage::Swift => "Swift",
            CodingLanguage::Kotlin => "Kotlin",
            CodingLanguage::Html => "HTML",
            CodingLanguage::Css => "CSS",
            CodingLanguage::Sql => "SQL",
            CodingLanguage::Shell => "Shell",
        }
    }

    /// Lowercase extensions, leading dot included
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            CodingLanguage::Python => &[".py", ".pyi", ".pyw"],
            CodingLanguage::Java => &[".java"],
            CodingLanguage::Javascript => &[".js", ".jsx", ".mjs", ".cjs"],
            CodingLanguage::Typescript => &[".ts", ".tsx"],
            CodingLanguage::C => &[".c", ".h"],
            CodingLanguage::Cpp => &[".cpp", ".cc", ".cxx", ".hpp", ".hh"],
            CodingLanguage::CSharp => &[".cs"],
            CodingLanguage::Go => &[".go"],
            CodingLanguage::Ruby => &[".rb"],
            CodingLanguage::Php => &[".php"],
            CodingLanguage::Rust => &[".rs"],
            CodingLanguage::Swift => &[".swift"],
            CodingLanguage::Kotlin => &[".kt", ".kts"],
            CodingLanguage::Html => &[".html", ".htm"],
            CodingLanguage::Css => &[".css", ".scss", ".sass", ".less"],
            CodingLanguage::Sql => &[".sql"],
            CodingLanguage::Shell => &[".sh", ".bash", ".zsh"],
        }
    }

    /// Looks up a language by extension, with or without the leading dot
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        let ext = if ext.starts_with('.') { ext } else { format!(".{ext}") };
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Case-insensitive lookup by display name
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.display_name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for CodingLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Kind of work a file represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileDomain {
    Design,
    Code,
    Test,
    Documentation,
}

impl FileDomain {
    pub const ALL: &'static [FileDomain] = &[
        FileDomain::Design,
        FileDomain::Code,
        FileDomain::Test,
        FileDomain::Documentation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FileDomain::Design => "design",
            FileDomain::Code => "code",
            FileDomain::Test => "test",
            FileDomain::Documentation => "documentation",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.as_str() == value)
    }
}

impl fmt::Display for FileDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A skill or framework name paired with its relative weight.
///
/// Ordering compares weights only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedSkill {
    pub skill_name: String,
    pub weight: f64,
}

impl WeightedSkill {
    pub fn new(skill_name: impl Into<String>, weight: f64) -> Self {
        Self {
            skill_name: skill_name.into(),
            weight,
        }
    }
}

impl PartialOrd for WeightedSkill {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.weight.total_cmp(&other.weight))
    }
}
