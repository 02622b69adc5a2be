use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{captures, unique};
use crate::analyzer_trait::{CodeMetrics, LanguageAnalyzer};
use crate::error::AnalyzerResult;
use crate::kind::AnalyzerKind;

pub(crate) static FUNCTION_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfunction\s+(\w+)\s*\(").expect("valid regex literal"));
pub(crate) static ARROW_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:const|let|var)\s+(\w+)\s*=\s*(?:\([^)]*\)|[\w]+)\s*=>")
        .expect("valid regex literal")
});
static FUNCTION_EXPR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:const|let|var)\s+(\w+)\s*=\s*function\s*\(").expect("valid regex literal")
});
pub(crate) static CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bclass\s+(\w+)").expect("valid regex literal"));
static IMPORT_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+.*?\s+from\s+['"]([^'"]+)['"]"#).expect("valid regex literal")
});
static REQUIRE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#).expect("valid regex literal")
});

/// External module names from `import ... from` and `require(...)`.
///
/// Relative and absolute paths are dropped; the rest collapse to their
/// first path segment.
pub(crate) fn package_imports(source: &str) -> Vec<String> {
    let sources = captures(&IMPORT_FROM, source)
        .into_iter()
        .chain(captures(&REQUIRE, source));
    unique(
        sources
            .filter(|s| !s.starts_with('.') && !s.starts_with('/'))
            .map(|s| s.split('/').next().unwrap_or(s)),
    )
}

pub struct JavaScriptAnalyzer;

impl JavaScriptAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaScriptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for JavaScriptAnalyzer {
    fn supported_extensions(&self) -> &[&str] {
        &[".js", ".jsx"]
    }

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::JavaScript
    }

    fn analyze_source(&self, _path: &Path, source: &str) -> AnalyzerResult<CodeMetrics> {
        let functions = FUNCTION_DECL.find_iter(source).count()
            + ARROW_FUNCTION.find_iter(source).count()
            + FUNCTION_EXPR.find_iter(source).count();

        Ok(CodeMetrics {
            functions,
            classes: CLASS.find_iter(source).count(),
            interfaces: None,
            imports: package_imports(source),
        })
    }
}
