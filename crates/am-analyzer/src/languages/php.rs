use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{captures, unique};
use crate::analyzer_trait::{CodeMetrics, LanguageAnalyzer};
use crate::error::AnalyzerResult;
use crate::kind::AnalyzerKind;

static FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bfunction\s+([a-zA-Z_]\w*)\s*\(").expect("valid regex literal")
});
static ARROW_FN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfn\s*\(").expect("valid regex literal"));
static CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bclass\s+[A-Za-z_]\w*").expect("valid regex literal"));
static INTERFACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\binterface\s+[A-Za-z_]\w*").expect("valid regex literal"));
static USE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\buse\s+([A-Za-z_][\w\\]+)\s*;").expect("valid regex literal")
});
static INCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\b(?:require|include|require_once|include_once)\s*\(\s*['"]([^'"]+)['"]\s*\)"#,
    )
    .expect("valid regex literal")
});

pub struct PhpAnalyzer;

impl PhpAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PhpAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for PhpAnalyzer {
    fn supported_extensions(&self) -> &[&str] {
        &[".php"]
    }

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Php
    }

    fn analyze_source(&self, _path: &Path, source: &str) -> AnalyzerResult<CodeMetrics> {
        let named: HashSet<&str> = captures(&FUNCTION, source).into_iter().collect();
        let imports = unique(
            captures(&USE, source)
                .into_iter()
                .chain(captures(&INCLUDE, source)),
        );

        Ok(CodeMetrics {
            functions: named.len() + ARROW_FN.find_iter(source).count(),
            classes: CLASS.find_iter(source).count(),
            interfaces: Some(INTERFACE.find_iter(source).count()),
            imports,
        })
    }
}
