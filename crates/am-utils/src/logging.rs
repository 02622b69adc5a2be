use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn,am=info";

/// Initialize the logging system with sensible defaults
pub fn init_logging() {
    init_logging_with_filter(DEFAULT_FILTER);
}

/// Initialize logging with a custom filter. `RUST_LOG` still wins when set.
///
/// Output goes to stderr so rendered résumés on stdout stay clean.
pub fn init_logging_with_filter(filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // A second initialization (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Convenience macros for structured logging
#[macro_export]
macro_rules! log_analysis_start {
    ($path:expr) => {
        tracing::debug!(path = %$path, "Starting file analysis");
    };
}

#[macro_export]
macro_rules! log_analysis_complete {
    ($path:expr, $stats:expr, $time_ms:expr) => {
        tracing::debug!(
            path = %$path,
            stats = $stats,
            time_ms = $time_ms,
            "File analysis complete"
        );
    };
}

#[macro_export]
macro_rules! log_aggregation {
    ($scope:expr, $name:expr, $stats:expr) => {
        tracing::info!(
            scope = %$scope,
            name = %$name,
            stats = $stats,
            "Aggregated statistics"
        );
    };
}
