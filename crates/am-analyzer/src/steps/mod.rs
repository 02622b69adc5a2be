//! Statistic-producing steps.
//!
//! Every file runs `base`; text kinds add `text`; then either `natural`
//! or `code`, and finally the language analyzer's metrics.

pub(crate) mod base;
pub(crate) mod code;
pub(crate) mod natural;
pub(crate) mod text;
