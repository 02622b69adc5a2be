use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

use super::captures;
use super::javascript::{package_imports, ARROW_FUNCTION, CLASS, FUNCTION_DECL};
use crate::analyzer_trait::{CodeMetrics, LanguageAnalyzer};
use crate::error::AnalyzerResult;
use crate::kind::AnalyzerKind;

static EXPORTED_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+function\s+(\w+)\s*\(").expect("valid regex literal")
});
static INTERFACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\binterface\s+(\w+)").expect("valid regex literal"));

pub struct TypeScriptAnalyzer;

impl TypeScriptAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TypeScriptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for TypeScriptAnalyzer {
    fn supported_extensions(&self) -> &[&str] {
        &[".ts", ".tsx"]
    }

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::TypeScript
    }

    fn analyze_source(&self, _path: &Path, source: &str) -> AnalyzerResult<CodeMetrics> {
        // Named, arrow, and exported functions overlap; count names once
        let names: IndexSet<&str> = captures(&FUNCTION_DECL, source)
            .into_iter()
            .chain(captures(&ARROW_FUNCTION, source))
            .chain(captures(&EXPORTED_FUNCTION, source))
            .collect();

        Ok(CodeMetrics {
            functions: names.len(),
            classes: CLASS.find_iter(source).count(),
            interfaces: Some(INTERFACE.find_iter(source).count()),
            imports: package_imports(source),
        })
    }
}
