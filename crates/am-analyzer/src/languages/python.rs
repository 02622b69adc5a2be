use std::path::Path;
use std::sync::LazyLock;
#[cfg(feature = "python")]
use std::sync::Mutex;

use regex::Regex;
#[cfg(feature = "python")]
use tree_sitter::{Node, Parser as TSParser, TreeCursor};

use super::{captures, unique};
use crate::analyzer_trait::{CodeMetrics, LanguageAnalyzer};
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::kind::AnalyzerKind;

static DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*def[ \t]+\w+").expect("valid regex literal")
});
static CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*class[ \t]+\w+").expect("valid regex literal"));
static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*import[ \t]+([\w.]+(?:[ \t]+as[ \t]+\w+)?(?:[ \t]*,[ \t]*[\w.]+(?:[ \t]+as[ \t]+\w+)?)*)")
        .expect("valid regex literal")
});
static FROM_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*from[ \t]+([\w.]+)[ \t]+import\b").expect("valid regex literal")
});

/// Top-level package of a dotted module path
fn top_level(module: &str) -> &str {
    module.split('.').next().unwrap_or(module)
}

/// Syntax-tree analysis of Python modules.
///
/// Counts synchronous function and class definitions at any depth.
/// `async def` is not counted. A bare `from . import x` names no module
/// and contributes no import.
pub struct PythonAnalyzer {
    #[cfg(feature = "python")]
    parser: Mutex<TSParser>,
}

impl PythonAnalyzer {
    #[cfg(feature = "python")]
    pub fn new() -> Self {
        let mut parser = TSParser::new();
        parser
            .set_language(tree_sitter_python::language())
            .expect("Error loading Python grammar");
        Self {
            parser: Mutex::new(parser),
        }
    }

    #[cfg(not(feature = "python"))]
    pub fn new() -> Self {
        Self {}
    }

    /// Line-oriented fallback used when the grammar is not compiled in
    pub fn analyze_with_regex(source: &str) -> CodeMetrics {
        let mut imports = Vec::new();
        for list in captures(&IMPORT, source) {
            for item in list.split(',') {
                let module = item.split_whitespace().next().unwrap_or("");
                if !module.is_empty() {
                    imports.push(top_level(module));
                }
            }
        }
        for module in captures(&FROM_IMPORT, source) {
            let module = module.trim_start_matches('.');
            if !module.is_empty() {
                imports.push(top_level(module));
            }
        }

        CodeMetrics {
            functions: DEF.find_iter(source).count(),
            classes: CLASS.find_iter(source).count(),
            interfaces: None,
            imports: unique(imports),
        }
    }

    #[cfg(feature = "python")]
    fn analyze_tree(&self, path: &Path, source: &str) -> AnalyzerResult<CodeMetrics> {
        let tree = {
            let mut parser = self
                .parser
                .lock()
                .map_err(|_| AnalyzerError::parse(path.display().to_string(), "parser lock poisoned"))?;
            parser.parse(source, None)
        }
        .ok_or_else(|| AnalyzerError::parse(path.display().to_string(), "parser returned no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(AnalyzerError::parse(
                path.display().to_string(),
                "syntax error in Python source",
            ));
        }

        let mut metrics = CodeMetrics::default();
        let mut imports = Vec::new();
        let mut cursor = root.walk();
        walk_tree(&mut cursor, source, &mut metrics, &mut imports);
        metrics.imports = unique(imports);
        Ok(metrics)
    }
}

impl Default for PythonAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "python")]
fn walk_tree(cursor: &mut TreeCursor, source: &str, metrics: &mut CodeMetrics, imports: &mut Vec<String>) {
    let node = cursor.node();
    match node.kind() {
        "function_definition" => {
            if node.child(0).map(|c| c.kind()) != Some("async") {
                metrics.functions += 1;
            }
        }
        "class_definition" => metrics.classes += 1,
        "import_statement" => {
            process_import(node, source, imports);
            return;
        }
        "import_from_statement" => {
            process_from_import(node, source, imports);
            return;
        }
        "future_import_statement" => {
            imports.push("__future__".to_string());
            return;
        }
        _ => {}
    }

    if cursor.goto_first_child() {
        loop {
            walk_tree(cursor, source, metrics, imports);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}

#[cfg(feature = "python")]
fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// `import a.b, c as d`
#[cfg(feature = "python")]
fn process_import(node: Node, source: &str, imports: &mut Vec<String>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        let module = match child.kind() {
            "dotted_name" => Some(child),
            "aliased_import" => child.child_by_field_name("name"),
            _ => None,
        };
        if let Some(module) = module {
            let text = node_text(module, source);
            if !text.is_empty() {
                imports.push(top_level(text).to_string());
            }
        }
    }
}

/// `from a.b import c` and `from .a import c`
#[cfg(feature = "python")]
fn process_from_import(node: Node, source: &str, imports: &mut Vec<String>) {
    let Some(module) = node.child_by_field_name("module_name") else {
        return;
    };
    let dotted = match module.kind() {
        "dotted_name" => Some(module),
        "relative_import" => {
            let mut cursor = module.walk();
            let found = module
                .named_children(&mut cursor)
                .find(|child| child.kind() == "dotted_name");
            found
        }
        _ => None,
    };
    if let Some(dotted) = dotted {
        imports.push(top_level(node_text(dotted, source)).to_string());
    }
}

impl LanguageAnalyzer for PythonAnalyzer {
    fn supported_extensions(&self) -> &[&str] {
        &[".py"]
    }

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Python
    }

    #[cfg(feature = "python")]
    fn analyze_source(&self, path: &Path, source: &str) -> AnalyzerResult<CodeMetrics> {
        self.analyze_tree(path, source)
    }

    #[cfg(not(feature = "python"))]
    fn analyze_source(&self, _path: &Path, source: &str) -> AnalyzerResult<CodeMetrics> {
        Ok(Self::analyze_with_regex(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"import os
import numpy as np, pandas.io
from sklearn.linear_model import LinearRegression
from . import sibling
from .models import User

class Model:
    def fit(self, x):
        def inner():
            return x
        return inner()

    async def predict(self, x):
        return x

def main():
    pass
"#;

    #[test]
    fn test_python_metrics() {
        let metrics = PythonAnalyzer::new()
            .analyze_source(Path::new("model.py"), SAMPLE)
            .unwrap();
        assert_eq!(metrics.functions, 3);
        assert_eq!(metrics.classes, 1);
        assert_eq!(metrics.interfaces, None);
        assert_eq!(metrics.imports, vec!["os", "numpy", "pandas", "sklearn", "models"]);
    }

    #[test]
    fn test_regex_fallback_agrees_on_sample() {
        let metrics = PythonAnalyzer::analyze_with_regex(SAMPLE);
        assert_eq!(metrics.functions, 3);
        assert_eq!(metrics.classes, 1);
        assert_eq!(metrics.imports, vec!["os", "numpy", "pandas", "sklearn", "models"]);
    }

    #[test]
    fn test_empty_module() {
        let metrics = PythonAnalyzer::new()
            .analyze_source(Path::new("empty.py"), "")
            .unwrap();
        assert_eq!(metrics, CodeMetrics::default());
    }

    #[cfg(feature = "python")]
    #[test]
    fn test_syntax_error_is_reported() {
        let err = PythonAnalyzer::new()
            .analyze_source(Path::new("broken.py"), "def broken(:\n    pass\n")
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Parse { .. }));
    }
}
