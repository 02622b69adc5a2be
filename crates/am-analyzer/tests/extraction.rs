use std::fs;

use am_analyzer::{
    extract_file_reports, extract_file_reports_parallel, get_appropriate_analyzer,
    AnalysisContext, AnalyzerConfig, AnalyzerKind,
};
use am_git::testing::TestRepo;
use am_types::{CodingLanguage, FileDomain, FileReport, FileStat, ProjectFiles, StatValue};
use tempfile::TempDir;

fn report<'r>(reports: &'r [FileReport], path: &str) -> &'r FileReport {
    reports
        .iter()
        .find(|r| r.filepath == path)
        .unwrap_or_else(|| panic!("no report for {path}"))
}

#[test]
fn test_solo_author_python_file() {
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
    let config = AnalyzerConfig::default().with_email("alice@x");
    let reports = extract_file_reports(Some(&project), &config);

    assert_eq!(reports.len(), 1);
    let file = &reports[0];
    assert_eq!(file.lines(), Some(3));
    assert_eq!(file.commit_percentage(), Some(100.0));
    assert_eq!(file.domain(), Some(FileDomain::Code));
    assert_eq!(file.language(), Some(CodingLanguage::Python));
    assert_eq!(
        file.get_value(FileStat::NumberOfFunctions),
        Some(&StatValue::Integer(1))
    );
    assert_eq!(file.imported_packages().to_vec(), vec!["os".to_string()]);
    assert_eq!(file.date_created().unwrap().timestamp(), 1_700_000_000);
}

#[test]
fn test_shared_file_blame_and_author_filter() {
    let fixture = TestRepo::new();
    fixture.commit_file("alice@x", "shared.py", "one\ntwo\nthree\n", 1_700_000_000);
    fixture.commit_file("bob@x", "shared.py", "one\n2\n3\n4\n5\n", 1_700_000_100);
    fixture.commit_file("bob@x", "bob_only.py", "x = 1\n", 1_700_000_200);
    fixture.write_file("scratch.py", "y = 2\n");

    let project = ProjectFiles::new("team", fixture.path())
        .with_files(["shared.py", "bob_only.py", "scratch.py"])
        .with_repo(fixture.path());
    let config = AnalyzerConfig::default().with_email("alice@x");
    let reports = extract_file_reports(Some(&project), &config);

    // bob_only.py is tracked without a commit by alice
    let paths: Vec<_> = reports.iter().map(|r| r.filepath.as_str()).collect();
    assert_eq!(paths, vec!["shared.py", "scratch.py"]);

    assert_eq!(report(&reports, "shared.py").commit_percentage(), Some(20.0));
    // untracked files carry no blame share
    assert_eq!(report(&reports, "scratch.py").commit_percentage(), None);
}

#[test]
fn test_unknown_extension_gets_metadata_only() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("logo.png"), [0x89, b'P', b'N', b'G']).unwrap();

    let project = ProjectFiles::new("assets", dir.path()).with_files(["logo.png"]);
    let reports = extract_file_reports(Some(&project), &AnalyzerConfig::default());

    assert_eq!(reports.len(), 1);
    let file = &reports[0];
    assert_eq!(file.size_bytes(), Some(4));
    assert!(file.date_created().is_some());
    assert!(file.date_modified().is_some());
    assert_eq!(file.lines(), None);
    assert_eq!(file.domain(), None);
}

#[test]
fn test_language_filter_keeps_named_languages() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("style.css"), ".a { color: red; }\n").unwrap();
    fs::write(dir.path().join("main.py"), "print('hi')\n").unwrap();
    fs::write(dir.path().join("README.md"), "Hello.\n").unwrap();

    let project = ProjectFiles::new("site", dir.path())
        .with_files(["style.css", "main.py", "README.md"]);
    let config = AnalyzerConfig::default().with_language_filter(["css"]);
    let reports = extract_file_reports(Some(&project), &config);

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].filepath, "style.css");
    assert_eq!(reports[0].language(), Some(CodingLanguage::Css));
}

#[test]
fn test_empty_code_file_keeps_common_statistics() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("empty.py"), "").unwrap();

    let project = ProjectFiles::new("empty", dir.path()).with_files(["empty.py"]);
    let reports = extract_file_reports(Some(&project), &AnalyzerConfig::default());

    let file = &reports[0];
    assert_eq!(file.lines(), Some(1));
    assert_eq!(
        file.get_value(FileStat::NumberOfFunctions),
        Some(&StatValue::Integer(0))
    );
    assert!(file.imported_packages().is_empty());
    assert_eq!(file.language(), Some(CodingLanguage::Python));
}

#[test]
fn test_documentation_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("NOTES.md"),
        "This is sentence one. This is sentence two! Is this three?",
    )
    .unwrap();

    let project = ProjectFiles::new("docs", dir.path()).with_files(["NOTES.md"]);
    let reports = extract_file_reports(Some(&project), &AnalyzerConfig::default());

    let file = &reports[0];
    assert_eq!(file.domain(), Some(FileDomain::Documentation));
    assert_eq!(file.get_value(FileStat::SentenceCount), Some(&StatValue::Integer(3)));
    let ari = file
        .get_value(FileStat::AriWritingScore)
        .and_then(|v| v.as_float())
        .unwrap();
    assert!(ari != 0.0);
}

#[test]
fn test_missing_inputs_are_skipped() {
    assert!(extract_file_reports(None, &AnalyzerConfig::default()).is_empty());

    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("ok.txt"), "fine\n").unwrap();
    let project = ProjectFiles::new("partial", dir.path()).with_files(["gone.py", "ok.txt"]);
    let reports = extract_file_reports(Some(&project), &AnalyzerConfig::default());

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].filepath, "ok.txt");
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = TempDir::new().unwrap();
    for (name, body) in [
        ("b.js", "import x from 'lodash';\n"),
        ("a.py", "import numpy\n"),
        ("c.json", "{}\n"),
        ("tests/test_a.py", "def test_a():\n    pass\n"),
    ] {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    let project = ProjectFiles::new("mixed", dir.path())
        .with_files(["b.js", "a.py", "c.json", "tests/test_a.py"]);
    let config = AnalyzerConfig::default();

    let mut sequential = extract_file_reports(Some(&project), &config);
    sequential.sort_by(|a, b| a.filepath.cmp(&b.filepath));
    let parallel = extract_file_reports_parallel(&project, &config, None);

    // reading a file moves its access time, so compare content statistics only
    let summary = |reports: &[FileReport]| -> Vec<_> {
        reports
            .iter()
            .map(|r| (r.filepath.clone(), r.lines(), r.domain(), r.imported_packages().to_vec()))
            .collect()
    };
    assert_eq!(summary(&sequential[..]), summary(&parallel[..]));
    assert_eq!(
        report(&parallel, "tests/test_a.py").domain(),
        Some(FileDomain::Test)
    );
}

#[test]
fn test_should_include_without_repository() {
    let dir = TempDir::new().unwrap();
    let filter = vec!["Python".to_string()];

    let ctx = AnalysisContext::new(dir.path(), "src/app.py")
        .with_email(Some("alice@x"))
        .with_language_filter(Some(&filter));
    let analyzer = get_appropriate_analyzer(ctx);
    assert_eq!(analyzer.kind(), AnalyzerKind::Python);
    assert!(!analyzer.is_tracked());
    assert!(analyzer.should_include());

    let ctx = AnalysisContext::new(dir.path(), "src/app.rb").with_language_filter(Some(&filter));
    assert!(!get_appropriate_analyzer(ctx).should_include());
}
