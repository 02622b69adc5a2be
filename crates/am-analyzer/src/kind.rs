use std::fmt;

/// Which pipeline a file runs through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyzerKind {
    Base,
    Text,
    NaturalLanguage,
    Code,
    Python,
    Java,
    JavaScript,
    TypeScript,
    C,
    Css,
    Html,
    Php,
}

impl AnalyzerKind {
    /// Kinds that decode the file and count lines
    pub fn is_text(self) -> bool {
        self != AnalyzerKind::Base
    }

    /// Kinds that classify the file as code or test
    pub fn is_code(self) -> bool {
        !matches!(
            self,
            AnalyzerKind::Base | AnalyzerKind::Text | AnalyzerKind::NaturalLanguage
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnalyzerKind::Base => "base",
            AnalyzerKind::Text => "text",
            AnalyzerKind::NaturalLanguage => "natural-language",
            AnalyzerKind::Code => "code",
            AnalyzerKind::Python => "python",
            AnalyzerKind::Java => "java",
            AnalyzerKind::JavaScript => "javascript",
            AnalyzerKind::TypeScript => "typescript",
            AnalyzerKind::C => "c",
            AnalyzerKind::Css => "css",
            AnalyzerKind::Html => "html",
            AnalyzerKind::Php => "php",
        }
    }
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
