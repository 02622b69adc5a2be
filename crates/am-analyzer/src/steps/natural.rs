use std::sync::LazyLock;

use am_types::{FileDomain, FileStat, StatValue, StatisticIndex};
use regex::Regex;

use crate::error::AnalyzerResult;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+(?:'\w+)?\b").expect("valid regex literal"));
static CHARACTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9]").expect("valid regex literal"));
static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex literal"));

/// Word, character and sentence counts of a prose text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProseCounts {
    pub words: usize,
    pub characters: usize,
    pub sentences: usize,
}

impl ProseCounts {
    pub fn of(text: &str) -> Self {
        Self {
            words: WORD.find_iter(text).count(),
            characters: CHARACTER.find_iter(text).count(),
            sentences: SENTENCE_END.find_iter(text).count(),
        }
    }

    /// Automated Readability Index; 0 without words or sentences
    pub fn ari(&self) -> f64 {
        if self.words == 0 || self.sentences == 0 {
            return 0.0;
        }
        let words = self.words as f64;
        4.71 * (self.characters as f64 / words) + 0.5 * (words / self.sentences as f64) - 21.43
    }
}

pub(crate) fn record(text: &str, stats: &mut StatisticIndex) -> AnalyzerResult<()> {
    let counts = ProseCounts::of(text);
    stats.insert(FileStat::WordCount, StatValue::Integer(counts.words as i64))?;
    stats.insert(FileStat::CharacterCount, StatValue::Integer(counts.characters as i64))?;
    stats.insert(FileStat::SentenceCount, StatValue::Integer(counts.sentences as i64))?;
    stats.insert(FileStat::AriWritingScore, StatValue::Float(counts.ari()))?;
    stats.insert(
        FileStat::TypeOfFile,
        StatValue::FileDomain(FileDomain::Documentation),
    )?;
    Ok(())
}
