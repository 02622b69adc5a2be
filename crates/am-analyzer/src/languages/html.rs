use std::path::Path;
use std::sync::LazyLock;
#[cfg(feature = "html")]
use std::sync::Mutex;

use indexmap::IndexSet;
use regex::Regex;
#[cfg(feature = "html")]
use tree_sitter::{Node, Parser as TSParser, TreeCursor};

use super::{captures, unique};
use crate::analyzer_trait::{CodeMetrics, LanguageAnalyzer};
#[cfg(feature = "html")]
use crate::error::AnalyzerError;
use crate::error::AnalyzerResult;
use crate::kind::AnalyzerKind;

static SCRIPT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*script\b").expect("valid regex literal"));
static CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)class\s*=\s*(?:"(.*?)"|'(.*?)'|([^\s>]+))"#).expect("valid regex literal")
});
static SCRIPT_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<\s*script[^>]*\bsrc\s*=\s*["']([^"']+)["']"#).expect("valid regex literal")
});
static LINK_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<\s*link[^>]*\bhref\s*=\s*["']([^"']+)["']"#).expect("valid regex literal")
});
static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<\s*img[^>]*\bsrc\s*=\s*["']([^"']+)["']"#).expect("valid regex literal")
});

/// Markup analysis: `<script>` blocks stand in for functions, distinct
/// class tokens for classes, external resources for imports
pub struct HtmlAnalyzer {
    #[cfg(feature = "html")]
    parser: Mutex<TSParser>,
}

impl HtmlAnalyzer {
    #[cfg(feature = "html")]
    pub fn new() -> Self {
        let mut parser = TSParser::new();
        parser
            .set_language(tree_sitter_html::language())
            .expect("Error loading HTML grammar");
        Self {
            parser: Mutex::new(parser),
        }
    }

    #[cfg(not(feature = "html"))]
    pub fn new() -> Self {
        Self {}
    }

    /// Tag-level scan used when the grammar is not compiled in
    pub fn analyze_with_regex(source: &str) -> CodeMetrics {
        let mut classes = IndexSet::new();
        for caps in CLASS_ATTR.captures_iter(source) {
            let raw = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or("");
            classes.extend(raw.split_whitespace());
        }

        let mut imports = captures(&SCRIPT_SRC, source);
        imports.extend(captures(&LINK_HREF, source));
        imports.extend(captures(&IMG_SRC, source));

        CodeMetrics {
            functions: SCRIPT_TAG.find_iter(source).count(),
            classes: classes.len(),
            interfaces: None,
            imports: unique(imports),
        }
    }

    #[cfg(feature = "html")]
    fn analyze_tree(&self, path: &Path, source: &str) -> AnalyzerResult<CodeMetrics> {
        let tree = {
            let mut parser = self
                .parser
                .lock()
                .map_err(|_| AnalyzerError::parse(path.display().to_string(), "parser lock poisoned"))?;
            parser.parse(source, None)
        }
        .ok_or_else(|| AnalyzerError::parse(path.display().to_string(), "parser returned no tree"))?;

        let mut collected = Collected::default();
        let mut cursor = tree.root_node().walk();
        collect(&mut cursor, source, &mut collected);

        Ok(CodeMetrics {
            functions: collected.scripts,
            classes: collected.classes.len(),
            interfaces: None,
            imports: unique(collected.imports),
        })
    }
}

impl Default for HtmlAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "html")]
#[derive(Default)]
struct Collected {
    scripts: usize,
    classes: IndexSet<String>,
    imports: Vec<String>,
}

#[cfg(feature = "html")]
fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

#[cfg(feature = "html")]
fn collect(cursor: &mut TreeCursor, source: &str, out: &mut Collected) {
    let node = cursor.node();
    match node.kind() {
        "script_element" => out.scripts += 1,
        "start_tag" | "self_closing_tag" => process_tag(node, source, out),
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

/// Name and value of an `attribute` node; the value is empty when absent
#[cfg(feature = "html")]
fn attribute_pair<'s>(attribute: Node, source: &'s str) -> (&'s str, &'s str) {
    let mut name = "";
    let mut value = "";
    let mut cursor = attribute.walk();
    for child in attribute.named_children(&mut cursor) {
        match child.kind() {
            "attribute_name" => name = node_text(child, source),
            "attribute_value" => value = node_text(child, source),
            "quoted_attribute_value" => {
                let mut inner = child.walk();
                let unquoted = child
                    .named_children(&mut inner)
                    .find(|c| c.kind() == "attribute_value");
                if let Some(v) = unquoted {
                    value = node_text(v, source);
                }
            }
            _ => {}
        }
    }
    (name, value)
}

#[cfg(feature = "html")]
fn process_tag(tag: Node, source: &str, out: &mut Collected) {
    let mut tag_name = String::new();
    let mut attributes = Vec::new();
    let mut cursor = tag.walk();
    for child in tag.named_children(&mut cursor) {
        match child.kind() {
            "tag_name" => tag_name = node_text(child, source).to_lowercase(),
            "attribute" => attributes.push(attribute_pair(child, source)),
            _ => {}
        }
    }

    for (name, value) in attributes {
        let name = name.to_lowercase();
        if name == "class" {
            out.classes
                .extend(value.split_whitespace().map(str::to_string));
        }

        let is_resource = matches!(
            (tag_name.as_str(), name.as_str()),
            ("script", "src") | ("link", "href") | ("img", "src")
        );
        if is_resource && !value.is_empty() {
            out.imports.push(value.to_string());
        }
    }
}

impl LanguageAnalyzer for HtmlAnalyzer {
    fn supported_extensions(&self) -> &[&str] {
        &[".html", ".htm"]
    }

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Html
    }

    #[cfg(feature = "html")]
    fn analyze_source(&self, path: &Path, source: &str) -> AnalyzerResult<CodeMetrics> {
        if source.trim().is_empty() {
            return Ok(CodeMetrics::default());
        }
        self.analyze_tree(path, source)
    }

    #[cfg(not(feature = "html"))]
    fn analyze_source(&self, _path: &Path, source: &str) -> AnalyzerResult<CodeMetrics> {
        Ok(Self::analyze_with_regex(source))
    }
}
