use serde::{Deserialize, Serialize};

/// Per-run settings for file extraction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Author email used for blame attribution and inclusion filtering
    pub email: Option<String>,
    /// Display names of languages to keep; empty or absent keeps everything
    pub language_filter: Option<Vec<String>>,
    /// Analyze files on the rayon pool
    pub parallel: bool,
}

impl AnalyzerConfig {
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_language_filter<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.language_filter = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
