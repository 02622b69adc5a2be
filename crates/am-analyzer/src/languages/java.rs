use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{captures, unique};
use crate::analyzer_trait::{CodeMetrics, LanguageAnalyzer};
use crate::error::AnalyzerResult;
use crate::kind::AnalyzerKind;

static CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:public|private|protected)?\s*(?:static)?\s*(?:final)?\s*class\s+(\w+)")
        .expect("valid regex literal")
});
static METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:public|private|protected)?\s*(?:static)?\s*(?:final)?\s*\w+\s+(\w+)\s*\([^)]*\)\s*(?:throws\s+\w+(?:,\s*\w+)*)?\s*\{",
    )
    .expect("valid regex literal")
});
static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*import\s+(?:static\s+)?([a-zA-Z_][\w.]*)").expect("valid regex literal")
});

/// Regex heuristics over method signatures, class headers, and imports
pub struct JavaAnalyzer;

impl JavaAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for JavaAnalyzer {
    fn supported_extensions(&self) -> &[&str] {
        &[".java"]
    }

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Java
    }

    fn analyze_source(&self, _path: &Path, source: &str) -> AnalyzerResult<CodeMetrics> {
        let imports = unique(
            captures(&IMPORT, source)
                .into_iter()
                .map(|import| import.split('.').next().unwrap_or(import)),
        );

        Ok(CodeMetrics {
            functions: METHOD.find_iter(source).count(),
            classes: CLASS.find_iter(source).count(),
            interfaces: None,
            imports,
        })
    }
}
