//! `artifact-miner`: discovers the projects below a directory, analyzes
//! them and prints a résumé, optionally followed by a portfolio summary.

use std::fs;
use std::path::PathBuf;

use am_analyzer::AnalyzerConfig;
use am_report::{build_user_report, PortfolioPrinter, ReportConfig};
use am_resume::{LatexResumeRenderer, TextResumeRenderer, UserResumeExt};
use am_utils::{console_reporter, init_logging_with_filter, logging::DEFAULT_FILTER};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::json;
use tracing::info;

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Latex,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "artifact-miner", version, about = "Turn project folders into résumé bullets")]
struct Cli {
    /// Directory holding one folder per project
    path: PathBuf,

    /// Author email used for blame attribution and commit shares
    #[arg(long, env = "ARTIFACT_MINER_EMAIL")]
    email: Option<String>,

    /// Only analyze files in these languages (repeatable)
    #[arg(long = "language", value_name = "LANGUAGE")]
    languages: Vec<String>,

    /// Name recorded on the portfolio
    #[arg(long, default_value = "me")]
    name: String,

    /// Résumé output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also print the readable portfolio summary
    #[arg(long)]
    portfolio: bool,

    /// Analyze files on all cores
    #[arg(long)]
    parallel: bool,

    /// JSON file with report settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report per-project progress on stderr
    #[arg(long)]
    progress: bool,

    /// Tracing filter, overridden by RUST_LOG
    #[arg(long, default_value = DEFAULT_FILTER)]
    log_filter: String,
}

impl Cli {
    fn report_config(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => ReportConfig::default(),
        };
        if let Some(email) = &self.email {
            config.email = Some(email.clone());
        }
        Ok(config)
    }

    /// Extraction settings; the email comes from the resolved report config
    fn analyzer_config(&self, report: &ReportConfig) -> AnalyzerConfig {
        let mut config = AnalyzerConfig::default().parallel(self.parallel);
        if let Some(email) = &report.email {
            config = config.with_email(email.clone());
        }
        if !self.languages.is_empty() {
            config = config.with_language_filter(self.languages.iter().cloned());
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging_with_filter(&cli.log_filter);

    let report_config = cli.report_config()?;
    let analyzer_config = cli.analyzer_config(&report_config);

    let projects = am_discovery::discover_projects(&cli.path)
        .with_context(|| format!("discovering projects in {}", cli.path.display()))?;
    info!("Analyzing {} projects", projects.len());

    let progress = cli.progress.then(console_reporter);
    let user = build_user_report(&cli.name, &projects, &analyzer_config, &report_config, progress)
        .context("aggregating project statistics")?;
    let resume = user.generate_resume(report_config.email.as_deref());

    match cli.format {
        OutputFormat::Text => print!("{}", resume.export(&TextResumeRenderer)),
        OutputFormat::Latex => print!("{}", resume.export(&LatexResumeRenderer)),
        OutputFormat::Json => {
            let document = json!({
                "resume": resume,
                "statistics": user.statistics.to_row(),
            });
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    if cli.portfolio {
        println!("{}", PortfolioPrinter::with_config(&user, &report_config).to_user_readable_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_build_configs() {
        let cli = Cli::parse_from([
            "artifact-miner",
            "projects",
            "--email",
            "me@x",
            "--language",
            "Python",
            "--language",
            "Javascript",
            "--parallel",
            "--format",
            "latex",
        ]);
        assert_eq!(cli.format, OutputFormat::Latex);

        let report = cli.report_config().unwrap();
        assert_eq!(report.email.as_deref(), Some("me@x"));
        assert_eq!(report.top_skills, 15);

        let analyzer = cli.analyzer_config(&report);
        assert_eq!(analyzer.email.as_deref(), Some("me@x"));
        assert!(analyzer.parallel);
        assert_eq!(
            analyzer.language_filter,
            Some(vec!["Python".to_string(), "Javascript".to_string()])
        );
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["artifact-miner", "projects"]);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.name, "me");
        assert_eq!(cli.log_filter, DEFAULT_FILTER);
        let report = cli.report_config().unwrap();
        assert!(cli.analyzer_config(&report).language_filter.is_none());
    }

    #[test]
    fn test_email_from_config_file_reaches_extraction() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        fs::write(&path, r#"{"email":"alice@x","top_skills":5}"#).unwrap();

        let cli = Cli::parse_from([
            "artifact-miner",
            "projects",
            "--config",
            path.to_str().unwrap(),
        ]);
        let report = cli.report_config().unwrap();
        assert_eq!(report.email.as_deref(), Some("alice@x"));
        assert_eq!(report.top_skills, 5);
        assert_eq!(cli.analyzer_config(&report).email.as_deref(), Some("alice@x"));
    }

    #[test]
    fn test_flag_email_overrides_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        fs::write(&path, r#"{"email":"alice@x"}"#).unwrap();

        let cli = Cli::parse_from([
            "artifact-miner",
            "projects",
            "--config",
            path.to_str().unwrap(),
            "--email",
            "bob@x",
        ]);
        let report = cli.report_config().unwrap();
        assert_eq!(cli.analyzer_config(&report).email.as_deref(), Some("bob@x"));
    }
}
