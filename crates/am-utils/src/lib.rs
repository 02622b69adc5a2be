pub mod logging;
pub mod progress;

pub use logging::{init_logging, init_logging_with_filter};
pub use progress::{console_reporter, format_step, percent_complete, ProgressReporter, Stage};
