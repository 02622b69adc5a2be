//! Per-file statistics extraction.
//!
//! Files are routed by extension to a pipeline of steps (metadata, text,
//! prose or code) and, for supported languages, a language analyzer that
//! counts functions, classes, interfaces and imports.

pub mod analyzer_trait;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod file_analyzer;
pub mod kind;
pub mod languages;
mod steps;

pub use analyzer_trait::*;
pub use config::AnalyzerConfig;
pub use engine::*;
pub use error::*;
pub use extract::*;
pub use file_analyzer::{AnalysisContext, FileAnalyzer};
pub use kind::AnalyzerKind;
pub use steps::code::classify_domain;
pub use steps::natural::ProseCounts;
pub use steps::text::{count_lines, read_text};
