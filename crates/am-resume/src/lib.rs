//! Résumé generation: bullet rules over project statistics, the résumé
//! model, and text and LaTeX renderers.

pub mod builder;
pub mod error;
pub mod format;
pub mod render;
pub mod resume;
pub mod rules;

pub use builder::{default_builder, BulletPointBuilder};
pub use error::{ResumeError, ResumeResult};
pub use format::{float_to_percent, format_float};
pub use render::{escape_latex, LatexResumeRenderer, ResumeRenderer, TextResumeRenderer};
pub use resume::{ProjectResumeExt, Resume, UserResumeExt};
pub use rules::*;
