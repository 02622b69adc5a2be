use std::fs;
use std::sync::{Arc, Mutex};

use am_analyzer::{extract_file_reports_with_repo, AnalyzerConfig};
use am_git::testing::TestRepo;
use am_report::{
    analyze_project, build_user_report, PortfolioPrinter, ProjectAggregator, ReportConfig,
};
use am_resume::ProjectResumeExt;
use am_utils::{ProgressReporter, Stage};
use am_types::{
    CodingLanguage, FileDomain, FileReport, FileStat, ProjectFiles, ProjectStat, StatValue,
    StatisticIndex,
};
use tempfile::TempDir;

fn configs(email: Option<&str>) -> (AnalyzerConfig, ReportConfig) {
    match email {
        Some(email) => (
            AnalyzerConfig::default().with_email(email),
            ReportConfig::default().with_email(email),
        ),
        None => (AnalyzerConfig::default(), ReportConfig::default()),
    }
}

fn float(report: &am_types::ProjectReport, stat: ProjectStat) -> Option<f64> {
    report.get_value(stat).and_then(StatValue::as_float)
}

fn assert_sums_to_one(values: impl Iterator<Item = f64>) {
    let values: Vec<f64> = values.collect();
    assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
    let sum: f64 = values.iter().sum();
    assert!((sum - 1.0).abs() < 1e-4, "sum was {sum}");
}

#[test]
fn test_solo_author_project() {
    let fixture = TestRepo::new();
    fixture.commit_file(
        "alice@x",
        "main.py",
        "import os\ndef main():\n    return os.getcwd()",
        1_700_000_000,
    );
    let project = ProjectFiles::new("solo", fixture.path())
        .with_files(["main.py"])
        .with_repo(fixture.path());

    let (analyzer_config, report_config) = configs(Some("alice@x"));
    let report = analyze_project(&project, &analyzer_config, &report_config, None).unwrap();

    assert_eq!(
        report.get_value(ProjectStat::IsGroupProject),
        Some(&StatValue::Boolean(false))
    );
    assert_eq!(
        report.get_value(ProjectStat::TotalAuthors),
        Some(&StatValue::Integer(1))
    );
    assert!(report.user_commit_percentage().is_none());
    assert_eq!(float(&report, ProjectStat::TotalProjectLines), Some(3.0));
    assert_eq!(float(&report, ProjectStat::TotalContributionPercentage), Some(100.0));

    let per_file = report
        .get_value(ProjectStat::AuthorsPerFile)
        .and_then(StatValue::as_path_counts)
        .unwrap();
    assert_eq!(per_file.get("main.py"), Some(&1));

    let file = &report.file_reports[0];
    assert_eq!(file.commit_percentage(), Some(100.0));
    assert_eq!(file.domain(), Some(FileDomain::Code));
    assert_eq!(file.language(), Some(CodingLanguage::Python));
    assert_eq!(report.start_date().unwrap().timestamp(), 1_700_000_000);
}

#[test]
fn test_two_author_project() {
    let fixture = TestRepo::new();
    fixture.commit_file("alice@x", "shared.py", "one\ntwo\nthree\n", 1_700_000_000);
    fixture.commit_file("bob@x", "shared.py", "one\n2\n3\n4\n5\n", 1_700_000_100);
    let project = ProjectFiles::new("team", fixture.path())
        .with_files(["shared.py"])
        .with_repo(fixture.path());

    let (analyzer_config, report_config) = configs(Some("alice@x"));
    let report = analyze_project(&project, &analyzer_config, &report_config, None).unwrap();

    assert_eq!(report.file_reports[0].commit_percentage(), Some(20.0));
    assert_eq!(
        report.get_value(ProjectStat::IsGroupProject),
        Some(&StatValue::Boolean(true))
    );
    assert_eq!(
        report.get_value(ProjectStat::TotalAuthors),
        Some(&StatValue::Integer(2))
    );
    assert_eq!(report.user_commit_percentage(), Some(50.0));
    assert_eq!(float(&report, ProjectStat::TotalContributionPercentage), Some(20.0));

    for stat in [ProjectStat::UserCommitPercentage, ProjectStat::TotalContributionPercentage] {
        let pct = float(&report, stat).unwrap();
        assert!((0.0..=100.0).contains(&pct));
    }
}

#[test]
fn test_single_author_without_email() {
    let fixture = TestRepo::new();
    fixture.commit_file("alice@x", "a.py", "x = 1\n", 1_700_000_000);
    fixture.commit_file("alice@x", "b.py", "y = 2\n", 1_700_000_100);
    let project = ProjectFiles::new("solo", fixture.path())
        .with_files(["a.py", "b.py"])
        .with_repo(fixture.path());

    let (analyzer_config, report_config) = configs(None);
    let report = analyze_project(&project, &analyzer_config, &report_config, None).unwrap();

    assert_eq!(
        report.get_value(ProjectStat::IsGroupProject),
        Some(&StatValue::Boolean(false))
    );
    assert!(report.user_commit_percentage().is_none());
    assert!(!report.statistics.contains(ProjectStat::TotalContributionPercentage));
}

#[test]
fn test_noreply_senders_are_not_authors() {
    let fixture = TestRepo::new();
    fixture.commit_file("alice@x", "a.py", "x = 1\n", 1_700_000_000);
    fixture.commit_file(
        "41898282+bot@users.noreply.github.com",
        "a.py",
        "x = 2\n",
        1_700_000_100,
    );
    let project = ProjectFiles::new("bot", fixture.path())
        .with_files(["a.py"])
        .with_repo(fixture.path());

    let (analyzer_config, report_config) = configs(Some("alice@x"));
    let report = analyze_project(&project, &analyzer_config, &report_config, None).unwrap();

    assert_eq!(
        report.get_value(ProjectStat::TotalAuthors),
        Some(&StatValue::Integer(1))
    );
    assert!(report.user_commit_percentage().is_none());
}

#[test]
fn test_language_ratio_by_bytes() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.py"), "#".repeat(600)).unwrap();
    fs::write(dir.path().join("b.js"), "/".repeat(400)).unwrap();
    let project = ProjectFiles::new("mixed", dir.path()).with_files(["a.py", "b.js"]);

    let (analyzer_config, report_config) = configs(None);
    let report = analyze_project(&project, &analyzer_config, &report_config, None).unwrap();

    let ratio = report.language_ratio().unwrap();
    let entries: Vec<_> = ratio.iter().map(|(l, r)| (*l, *r)).collect();
    assert_eq!(
        entries,
        vec![(CodingLanguage::Python, 0.6), (CodingLanguage::Javascript, 0.4)]
    );
    assert_sums_to_one(ratio.values().copied());
    // no repository: lines come from the file reports
    assert_eq!(float(&report, ProjectStat::TotalProjectLines), Some(2.0));
}

fn lines_file(path: &str, domain: FileDomain, lines: i64) -> FileReport {
    let mut stats = StatisticIndex::new();
    stats.insert(FileStat::LinesInFile, StatValue::Integer(lines)).unwrap();
    stats.insert(FileStat::TypeOfFile, StatValue::FileDomain(domain)).unwrap();
    FileReport::new(path, stats)
}

#[test]
fn test_activity_split_without_email() {
    let files = vec![
        lines_file("src/a.py", FileDomain::Code, 100),
        lines_file("src/b.py", FileDomain::Code, 100),
        lines_file("src/c.py", FileDomain::Code, 100),
        lines_file("tests/test_a.py", FileDomain::Test, 100),
    ];

    let config = ReportConfig::default();
    let report = ProjectAggregator::new(&config).aggregate("split", files).unwrap();
    let activity = report
        .get_value(ProjectStat::ActivityTypeContributions)
        .and_then(StatValue::as_domain_ratio)
        .unwrap();

    assert_eq!(activity.get(&FileDomain::Code), Some(&0.75));
    assert_eq!(activity.get(&FileDomain::Test), Some(&0.25));
    assert_sums_to_one(activity.values().copied());
}

#[test]
fn test_activity_uneven_split_still_sums_to_one() {
    let files = vec![
        lines_file("a.py", FileDomain::Code, 1),
        lines_file("b.md", FileDomain::Documentation, 1),
        lines_file("c_test.py", FileDomain::Test, 1),
        lines_file("d.html", FileDomain::Design, 0),
    ];

    let config = ReportConfig::default();
    let report = ProjectAggregator::new(&config).aggregate("thirds", files).unwrap();
    let activity = report
        .get_value(ProjectStat::ActivityTypeContributions)
        .and_then(StatValue::as_domain_ratio)
        .unwrap();

    // empty files do not take part
    assert!(!activity.contains_key(&FileDomain::Design));
    assert_sums_to_one(activity.values().copied());
}

#[test]
fn test_empty_project() {
    let dir = TempDir::new().unwrap();
    let project = ProjectFiles::new("empty", dir.path());

    let (analyzer_config, report_config) = configs(Some("alice@x"));
    let report = analyze_project(&project, &analyzer_config, &report_config, None).unwrap();

    assert!(report.file_reports.is_empty());
    assert!(report.start_date().is_none());
    assert!(report.end_date().is_none());
    assert!(report.language_ratio().is_none());
    assert!(report.skills().is_empty());
    assert!(report.frameworks().is_empty());
    assert!(!report.statistics.contains(ProjectStat::ActivityTypeContributions));
}

#[test]
fn test_aggregation_is_deterministic() {
    let fixture = TestRepo::new();
    fixture.commit_file("alice@x", "app.py", "import numpy\nx = 1\n", 1_700_000_000);
    fixture.commit_file("bob@x", "web/index.html", "<script></script>\n", 1_700_000_100);
    let project = ProjectFiles::new("repeat", fixture.path())
        .with_files(["app.py", "web/index.html"])
        .with_repo(fixture.path());

    let (analyzer_config, report_config) = configs(Some("alice@x"));
    let repo = fixture.open();
    let files = extract_file_reports_with_repo(&project, Some(&repo), &analyzer_config, None);

    let aggregator = ProjectAggregator::new(&report_config)
        .with_repo(Some(&repo))
        .with_root(fixture.path());
    let first = aggregator.aggregate("repeat", files.clone()).unwrap();
    let second = aggregator.aggregate("repeat", files).unwrap();
    assert_eq!(first.statistics, second.statistics);

    if let (Some(start), Some(end)) = (first.start_date(), first.end_date()) {
        assert!(start <= end);
    }
}

#[test]
fn test_portfolio_from_two_projects() {
    let solo = TestRepo::new();
    solo.commit_file("alice@x", "train.py", "import sklearn\n", 1_650_000_000);
    let team = TestRepo::new();
    team.commit_file("alice@x", "api.py", "import flask\n", 1_700_000_000);
    team.commit_file("bob@x", "api.py", "import flask\nimport os\n", 1_700_000_100);

    let projects = vec![
        ProjectFiles::new("solo", solo.path())
            .with_files(["train.py"])
            .with_repo(solo.path()),
        ProjectFiles::new("team", team.path())
            .with_files(["api.py"])
            .with_repo(team.path()),
    ];

    let (analyzer_config, report_config) = configs(Some("alice@x"));
    let user = build_user_report("me", &projects, &analyzer_config, &report_config, None).unwrap();

    assert_eq!(user.project_reports.len(), 2);
    assert_eq!(user.resume_items.len(), 2);
    assert!(user.start_date() <= user.end_date());
    assert_eq!(user.start_date().unwrap().timestamp(), 1_650_000_000);

    let text = PortfolioPrinter::new(&user).to_user_readable_string();
    assert!(text.starts_with("You started your first project on "));
    assert!(text.contains("Projects in chronological order:\n1. solo - Started "));
    assert!(text.contains("2. team - Started "));
}

#[test]
fn test_report_email_drives_blame() {
    let fixture = TestRepo::new();
    fixture.commit_file("alice@x", "main.py", "x = 1\ny = 2\n", 1_700_000_000);
    let project = ProjectFiles::new("solo", fixture.path())
        .with_files(["main.py"])
        .with_repo(fixture.path());

    // only the report side knows the user
    let analyzer_config = AnalyzerConfig::default();
    let report_config = ReportConfig::default().with_email("alice@x");
    let report = analyze_project(&project, &analyzer_config, &report_config, None).unwrap();

    assert_eq!(report.file_reports[0].commit_percentage(), Some(100.0));
    assert_eq!(float(&report, ProjectStat::TotalContributionPercentage), Some(100.0));
}

#[test]
fn test_author_without_commits_contributes_zero() {
    let fixture = TestRepo::new();
    fixture.commit_file("alice@x", "main.py", "x = 1\n", 1_700_000_000);
    let project = ProjectFiles::new("theirs", fixture.path())
        .with_files(["main.py"])
        .with_repo(fixture.path());

    let (analyzer_config, report_config) = configs(Some("bob@x"));
    let report = analyze_project(&project, &analyzer_config, &report_config, None).unwrap();

    assert!(report.file_reports.is_empty());
    let pct = float(&report, ProjectStat::TotalContributionPercentage).unwrap();
    assert_eq!(pct, 0.0);
    assert!(pct.is_sign_positive());

    let item = report.generate_resume_item();
    assert!(item
        .bullet_points
        .contains(&"Accounted for 0.0% of total contribution in the final deliverable".to_string()));
}

#[test]
fn test_email_case_is_ignored() {
    let fixture = TestRepo::new();
    fixture.commit_file("Alice@X", "shared.py", "one\ntwo\nthree\n", 1_700_000_000);
    fixture.commit_file("bob@x", "shared.py", "one\n2\n3\n4\n5\n", 1_700_000_100);
    let project = ProjectFiles::new("team", fixture.path())
        .with_files(["shared.py"])
        .with_repo(fixture.path());

    let (analyzer_config, report_config) = configs(Some("alice@x"));
    let report = analyze_project(&project, &analyzer_config, &report_config, None).unwrap();

    assert_eq!(report.file_reports.len(), 1);
    assert_eq!(report.file_reports[0].commit_percentage(), Some(20.0));
    assert_eq!(report.user_commit_percentage(), Some(50.0));
    assert_eq!(float(&report, ProjectStat::TotalContributionPercentage), Some(20.0));
}

#[derive(Default)]
struct RecordingReporter {
    steps: Mutex<Vec<(Stage, String, usize, usize)>>,
    finished: Mutex<Vec<Stage>>,
}

impl ProgressReporter for RecordingReporter {
    fn advance(&self, stage: Stage, item: &str, done: usize, total: usize) {
        self.steps.lock().unwrap().push((stage, item.to_string(), done, total));
    }

    fn finish(&self, stage: Stage, _summary: &str) {
        self.finished.lock().unwrap().push(stage);
    }
}

#[test]
fn test_portfolio_progress_counts_projects() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("a")).unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    fs::write(dir.path().join("a/x.py"), "x = 1\n").unwrap();
    fs::write(dir.path().join("b/y.py"), "y = 2\n").unwrap();
    let projects = vec![
        ProjectFiles::new("a", dir.path().join("a")).with_files(["x.py"]),
        ProjectFiles::new("b", dir.path().join("b")).with_files(["y.py"]),
    ];

    let recorder = Arc::new(RecordingReporter::default());
    let (analyzer_config, report_config) = configs(None);
    build_user_report(
        "me",
        &projects,
        &analyzer_config,
        &report_config,
        Some(recorder.clone() as Arc<dyn ProgressReporter>),
    )
    .unwrap();

    assert_eq!(
        *recorder.steps.lock().unwrap(),
        vec![
            (Stage::Projects, "a".to_string(), 1, 2),
            (Stage::Projects, "b".to_string(), 2, 2),
        ]
    );
    assert_eq!(*recorder.finished.lock().unwrap(), vec![Stage::Projects]);
}
