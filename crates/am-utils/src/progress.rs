use std::sync::Arc;

/// The unit a progress step counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Projects run through extraction and aggregation
    Projects,
    /// Files of one project run through extraction
    Files,
}

impl Stage {
    pub fn noun(self) -> &'static str {
        match self {
            Stage::Projects => "project",
            Stage::Files => "file",
        }
    }
}

/// Receives step counts from the miner's long-running stages.
///
/// `done` counts finished items, so the last call of a stage has
/// `done == total`.
pub trait ProgressReporter: Send + Sync {
    fn advance(&self, stage: Stage, item: &str, done: usize, total: usize);

    fn finish(&self, stage: Stage, summary: &str);
}

/// Writes one line per step to stderr
pub struct ConsoleProgressReporter;

impl ProgressReporter for ConsoleProgressReporter {
    fn advance(&self, stage: Stage, item: &str, done: usize, total: usize) {
        eprintln!("{}", format_step(stage, item, done, total));
    }

    fn finish(&self, stage: Stage, summary: &str) {
        eprintln!("{} stage done: {}", stage.noun(), summary);
    }
}

pub fn console_reporter() -> Arc<dyn ProgressReporter> {
    Arc::new(ConsoleProgressReporter)
}

/// `[ 50%] project 1/2: name`
pub fn format_step(stage: Stage, item: &str, done: usize, total: usize) -> String {
    format!(
        "[{:3.0}%] {} {}/{}: {}",
        percent_complete(done, total),
        stage.noun(),
        done,
        total,
        item
    )
}

/// Percentage of `done` out of `total`, 100 when there is nothing to do
pub fn percent_complete(done: usize, total: usize) -> f32 {
    if total == 0 {
        100.0
    } else {
        done as f32 / total as f32 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_complete() {
        assert_eq!(percent_complete(0, 0), 100.0);
        assert_eq!(percent_complete(1, 4), 25.0);
    }

    #[test]
    fn test_format_step() {
        assert_eq!(
            format_step(Stage::Projects, "blog", 1, 2),
            "[ 50%] project 1/2: blog"
        );
        assert_eq!(
            format_step(Stage::Files, "src/main.rs", 3, 3),
            "[100%] file 3/3: src/main.rs"
        );
    }
}
