use std::path::Path;
use std::sync::LazyLock;

use am_types::CodingLanguage;
use tracing::{debug, instrument};

use crate::analyzer_trait::LanguageAnalyzer;
use crate::file_analyzer::{AnalysisContext, FileAnalyzer};
use crate::kind::AnalyzerKind;
use crate::languages::{
    CAnalyzer, CssAnalyzer, HtmlAnalyzer, JavaAnalyzer, JavaScriptAnalyzer, PhpAnalyzer,
    PythonAnalyzer, TypeScriptAnalyzer,
};

/// Prose formats; checked before any code analyzer
pub const NATURAL_LANGUAGE_EXTENSIONS: &[&str] = &[".md", ".txt", ".rst", ".doc", ".docx"];

/// Structured text formats that only get line counts
pub const TEXT_EXTENSIONS: &[&str] = &[".xml", ".json", ".yml", ".yaml"];

static DEFAULT_ENGINE: LazyLock<AnalyzerEngine> = LazyLock::new(AnalyzerEngine::new);

/// Routes files to the pipeline and language analyzer that fit their extension
pub struct AnalyzerEngine {
    analyzers: Vec<Box<dyn LanguageAnalyzer>>,
}

impl AnalyzerEngine {
    /// Create an engine with every language analyzer registered
    pub fn new() -> Self {
        let analyzers: Vec<Box<dyn LanguageAnalyzer>> = vec![
            Box::new(PythonAnalyzer::new()),
            Box::new(JavaAnalyzer),
            Box::new(JavaScriptAnalyzer),
            Box::new(CAnalyzer),
            Box::new(TypeScriptAnalyzer),
            Box::new(CssAnalyzer::new()),
            Box::new(HtmlAnalyzer::new()),
            Box::new(PhpAnalyzer),
        ];
        Self { analyzers }
    }

    /// The language analyzer claiming `path`, if any
    pub fn language_analyzer(&self, path: &Path) -> Option<&dyn LanguageAnalyzer> {
        self.analyzers
            .iter()
            .find(|a| a.can_analyze(path))
            .map(|a| a.as_ref())
    }

    /// Pipeline selection in precedence order: prose, language analyzer,
    /// structured text, any known language, then metadata only
    pub fn kind_for(&self, path: &Path) -> AnalyzerKind {
        let extension = lowercase_extension(path);
        let ext = extension.as_str();

        if NATURAL_LANGUAGE_EXTENSIONS.contains(&ext) {
            return AnalyzerKind::NaturalLanguage;
        }
        if let Some(analyzer) = self.language_analyzer(path) {
            return analyzer.kind();
        }
        if TEXT_EXTENSIONS.contains(&ext) {
            return AnalyzerKind::Text;
        }
        if !ext.is_empty() && CodingLanguage::from_extension(ext).is_some() {
            return AnalyzerKind::Code;
        }
        AnalyzerKind::Base
    }

    /// Build the analyzer for one file of a project
    #[instrument(skip(self, ctx), fields(path = ctx.relative_path))]
    pub fn get_appropriate_analyzer<'a>(&'a self, ctx: AnalysisContext<'a>) -> FileAnalyzer<'a> {
        let path = Path::new(ctx.relative_path);
        let kind = self.kind_for(path);
        let language = if kind.is_code() {
            self.language_analyzer(path)
        } else {
            None
        };
        debug!(kind = %kind, "Selected analyzer");
        FileAnalyzer::new(ctx, kind, language)
    }

    /// Extensions claimed by registered language analyzers
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.analyzers
            .iter()
            .flat_map(|a| a.supported_extensions().iter().copied())
            .collect()
    }
}

impl Default for AnalyzerEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared engine; grammars load once per process
pub fn default_engine() -> &'static AnalyzerEngine {
    &DEFAULT_ENGINE
}

/// Build the analyzer for one file using the shared engine
pub fn get_appropriate_analyzer(ctx: AnalysisContext<'_>) -> FileAnalyzer<'_> {
    default_engine().get_appropriate_analyzer(ctx)
}

fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}
