//! Project and portfolio aggregation.
//!
//! [`ProjectAggregator`] turns the file reports of one project into project
//! statistics, [`UserAggregator`] folds projects into a portfolio, and
//! [`PortfolioPrinter`] renders the portfolio for people.

pub mod config;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod printer;
pub mod project;
pub mod user;

pub use config::ReportConfig;
pub use error::{ReportError, ReportResult};
pub use normalize::normalize_ratios;
pub use pipeline::{aligned_analyzer_config, analyze_project, build_user_report};
pub use printer::PortfolioPrinter;
pub use project::ProjectAggregator;
pub use user::UserAggregator;
