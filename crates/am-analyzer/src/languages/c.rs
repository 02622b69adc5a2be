use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::captures;
use crate::analyzer_trait::{CodeMetrics, LanguageAnalyzer};
use crate::error::AnalyzerResult;
use crate::kind::AnalyzerKind;

static FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[\w\s\*]+\s+([a-zA-Z_][\w]*)\s*\([^)]*\)\s*\{").expect("valid regex literal")
});
static STRUCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)struct\s+[a-zA-Z_][\w]*\s*\{[^}]*\}\s*;").expect("valid regex literal")
});
static INCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*#include\s+[<"]([^>"]+)[>"]"#).expect("valid regex literal")
});

/// Structs stand in for classes and `#include` targets for imports
pub struct CAnalyzer;

impl CAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for CAnalyzer {
    fn supported_extensions(&self) -> &[&str] {
        &[".c"]
    }

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::C
    }

    fn analyze_source(&self, _path: &Path, source: &str) -> AnalyzerResult<CodeMetrics> {
        Ok(CodeMetrics {
            functions: FUNCTION.find_iter(source).count(),
            classes: STRUCT.find_iter(source).count(),
            interfaces: None,
            imports: captures(&INCLUDE, source)
                .into_iter()
                .map(String::from)
                .collect(),
        })
    }
}
