pub mod error;
pub mod language;
pub mod numeric;
pub mod project;
pub mod report;
pub mod resume;
pub mod statistic;

pub use error::*;
pub use language::*;
pub use numeric::round_to;
pub use project::*;
pub use report::*;
pub use resume::*;
pub use statistic::*;
