use std::path::Path;
use std::sync::LazyLock;
#[cfg(feature = "css")]
use std::sync::Mutex;

use indexmap::IndexSet;
use regex::Regex;
#[cfg(feature = "css")]
use tree_sitter::{Node, Parser as TSParser, TreeCursor};

use super::unique;
use crate::analyzer_trait::{CodeMetrics, LanguageAnalyzer};
#[cfg(feature = "css")]
use crate::error::AnalyzerError;
use crate::error::AnalyzerResult;
use crate::kind::AnalyzerKind;

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex literal"));
static RULE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^{@][^{]+\{[^{}]*\}|@[^{}]+\{[^{}]*\}").expect("valid regex literal")
});
static CLASS_SELECTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([a-zA-Z_-][\w-]*)").expect("valid regex literal"));
static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@import\s+(?:url\(\s*['"]?([^'")]+)['"]?\s*\)|['"]([^'"]+)['"])"#)
        .expect("valid regex literal")
});

/// Stylesheet analysis.
///
/// Functions are rule blocks: top-level style rules plus at-rules that
/// carry a block. Classes are distinct `.class` selectors and imports
/// are `@import` targets.
pub struct CssAnalyzer {
    #[cfg(feature = "css")]
    parser: Mutex<TSParser>,
}

impl CssAnalyzer {
    #[cfg(feature = "css")]
    pub fn new() -> Self {
        let mut parser = TSParser::new();
        parser
            .set_language(tree_sitter_css::language())
            .expect("Error loading CSS grammar");
        Self {
            parser: Mutex::new(parser),
        }
    }

    #[cfg(not(feature = "css"))]
    pub fn new() -> Self {
        Self {}
    }

    /// Best-effort scan used when the grammar is not compiled in
    pub fn analyze_with_regex(source: &str) -> CodeMetrics {
        let cleaned = COMMENT.replace_all(source, "");

        let classes: IndexSet<&str> = CLASS_SELECTOR
            .captures_iter(&cleaned)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect();

        let imports = IMPORT
            .captures_iter(&cleaned)
            .filter_map(|c| c.get(1).or_else(|| c.get(2)))
            .map(|m| m.as_str().to_string())
            .collect::<Vec<_>>();

        CodeMetrics {
            functions: RULE_BLOCK.find_iter(&cleaned).count(),
            classes: classes.len(),
            interfaces: None,
            imports: unique(imports),
        }
    }

    #[cfg(feature = "css")]
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
        let mut rule_count = 0;
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            if is_rule_block(child) {
                rule_count += 1;
            }
        }

        let mut collected = Collected::default();
        let mut cursor = root.walk();
        collect(&mut cursor, source, &mut collected);

        Ok(CodeMetrics {
            functions: rule_count,
            classes: collected.classes.len(),
            interfaces: None,
            imports: unique(collected.imports),
        })
    }
}

impl Default for CssAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "css")]
#[derive(Default)]
struct Collected {
    classes: IndexSet<String>,
    imports: Vec<String>,
}

#[cfg(feature = "css")]
fn is_rule_block(node: Node) -> bool {
    match node.kind() {
        "rule_set" | "media_statement" | "supports_statement" | "keyframes_statement" => true,
        "at_rule" => {
            let mut cursor = node.walk();
            let has_block = node.children(&mut cursor).any(|c| c.kind() == "block");
            has_block
        }
        _ => false,
    }
}

#[cfg(feature = "css")]
fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

#[cfg(feature = "css")]
fn strip_quotes(text: &str) -> &str {
    text.trim().trim_matches(|c| c == '"' || c == '\'')
}

#[cfg(feature = "css")]
fn collect(cursor: &mut TreeCursor, source: &str, out: &mut Collected) {
    let node = cursor.node();
    match node.kind() {
        "class_name" => {
            out.classes.insert(node_text(node, source).to_string());
        }
        "import_statement" => {
            collect_import(node, source, out);
            return;
        }
        _ => {}
    }

    if cursor.goto_first_child() {
        loop {
            collect(cursor, source, out);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}

/// `@import "a.css"` and `@import url(a.css)`
#[cfg(feature = "css")]
fn collect_import(node: Node, source: &str, out: &mut Collected) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "string_value" => {
                let target = strip_quotes(node_text(child, source));
                if !target.is_empty() {
                    out.imports.push(target.to_string());
                }
            }
            "call_expression" => {
                let Some(arguments) = child.child_by_field_name("arguments").or_else(|| {
                    let mut args_cursor = child.walk();
                    let found = child
                        .named_children(&mut args_cursor)
                        .find(|c| c.kind() == "arguments");
                    found
                }) else {
                    continue;
                };
                let mut args_cursor = arguments.walk();
                for arg in arguments.named_children(&mut args_cursor) {
                    if matches!(arg.kind(), "string_value" | "plain_value") {
                        let target = strip_quotes(node_text(arg, source));
                        if !target.is_empty() {
                            out.imports.push(target.to_string());
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

impl LanguageAnalyzer for CssAnalyzer {
    fn supported_extensions(&self) -> &[&str] {
        &[".css"]
    }

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Css
    }

    #[cfg(feature = "css")]
    fn analyze_source(&self, path: &Path, source: &str) -> AnalyzerResult<CodeMetrics> {
        if source.trim().is_empty() {
            return Ok(CodeMetrics::default());
        }
        self.analyze_tree(path, source)
    }

    #[cfg(not(feature = "css"))]
    fn analyze_source(&self, _path: &Path, source: &str) -> AnalyzerResult<CodeMetrics> {
        Ok(Self::analyze_with_regex(source))
    }
}
