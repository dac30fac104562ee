// tests/integration_report.rs
//! Emitter tests: the markdown and JSON renderers must expose everything
//! a downstream consumer needs from a `CodebaseReport`.

use anyhow::Result;
use std::fs;
use tempfile::TempDir;

use appraise_core::analysis::Engine;
use appraise_core::config::Config;
use appraise_core::discovery;
use appraise_core::report::{json, markdown};
use appraise_core::types::CodebaseReport;

const DOCUMENTED: &str = r#"'''Documented module.'''


def work():
    '''Do the work.'''
    return 1
"#;

const UNDOCUMENTED: &str = "import sys\n\nx = 1\n";

const BROKEN: &str = "def broken(:\n";

fn analyze(files: &[(&str, &str)]) -> Result<CodebaseReport> {
    let dir = TempDir::new()?;
    for (name, content) in files {
        fs::write(dir.path().join(name), content)?;
    }
    let config = Config {
        root: dir.path().to_path_buf(),
        ..Config::default()
    };
    let discovered = discovery::discover(&config)?;
    Ok(Engine::new(config).analyze(&discovered)?)
}

#[test]
fn markdown_report_carries_summary_and_ratings() -> Result<()> {
    let report = analyze(&[("good.py", DOCUMENTED), ("bad.py", UNDOCUMENTED)])?;
    let rendered = markdown::render(&report);

    assert!(rendered.contains("# Code Quality Analysis Report"));
    assert!(rendered.contains("examined **2** files"));
    assert!(rendered.contains("Overall Codebase Grade"));
    assert!(rendered.contains("| UNUSED_IMPORT |"));
    assert!(rendered.contains("| MISSING_DOCSTRING |"));
    assert!(rendered.contains("good.py"));
    assert!(rendered.contains("bad.py"));
    assert!(rendered.contains("## Key Recommendations"));
    Ok(())
}

#[test]
fn markdown_report_enumerates_failed_files() -> Result<()> {
    let report = analyze(&[("good.py", DOCUMENTED), ("broken.py", BROKEN)])?;
    let rendered = markdown::render(&report);

    assert!(rendered.contains("## Files That Failed Analysis"));
    assert!(rendered.contains("broken.py"));
    Ok(())
}

#[test]
fn json_report_is_machine_readable() -> Result<()> {
    let report = analyze(&[
        ("good.py", DOCUMENTED),
        ("bad.py", UNDOCUMENTED),
        ("broken.py", BROKEN),
    ])?;
    let rendered = json::render(&report)?;
    let value: serde_json::Value = serde_json::from_str(&rendered)?;

    let summary = &value["summary"];
    assert_eq!(summary["total_files"], 3);
    assert!(summary["total_issues"].as_u64().unwrap() > 0);
    assert_eq!(summary["severity_counts"]["ERROR"], 1);
    assert_eq!(summary["kind_counts"]["ANALYSIS_FAILED"], 1);
    assert!(summary["overall"]["grade"].is_string());
    assert_eq!(summary["failed_files"].as_array().unwrap().len(), 1);

    // Two rated files; the broken one is excluded from scoring.
    assert_eq!(value["ratings"].as_object().unwrap().len(), 2);
    assert_eq!(value["files"].as_object().unwrap().len(), 3);
    assert!(value["recommendations"].is_array());
    Ok(())
}

#[test]
fn json_issue_rows_use_wire_labels() -> Result<()> {
    let report = analyze(&[("bad.py", UNDOCUMENTED)])?;
    let rendered = json::render(&report)?;
    let value: serde_json::Value = serde_json::from_str(&rendered)?;

    let files = value["files"].as_object().unwrap();
    let issues = files
        .values()
        .next()
        .and_then(|f| f["issues"].as_array())
        .unwrap();
    assert!(issues
        .iter()
        .any(|i| i["kind"] == "UNUSED_IMPORT" && i["severity"] == "INFO"));
    Ok(())
}
