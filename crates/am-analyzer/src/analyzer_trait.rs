use std::path::Path;

use crate::error::AnalyzerResult;
use crate::kind::AnalyzerKind;

/// Language-specific structure counts for one source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeMetrics {
    pub functions: usize,
    pub classes: usize,
    /// Only set by languages that have interfaces
    pub interfaces: Option<usize>,
    pub imports: Vec<String>,
}

/// Trait for language-specific analyzers
pub trait LanguageAnalyzer: Send + Sync {
    /// Get supported file extensions, lowercase with the leading dot
    fn supported_extensions(&self) -> &[&str];

    /// Get the analyzer kind this implementation provides
    fn kind(&self) -> AnalyzerKind;

    /// Check if this analyzer can handle the given file
    fn can_analyze(&self, path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_str = format!(".{}", ext.to_string_lossy().to_lowercase());
            self.supported_extensions().iter().any(|&e| e == ext_str)
        } else {
            false
        }
    }

    /// Extract metrics from decoded source text
    fn analyze_source(&self, path: &Path, source: &str) -> AnalyzerResult<CodeMetrics>;
}
