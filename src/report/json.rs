// src/report/json.rs
use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::types::{CodebaseReport, FileReport, Rating};

/// Serialized shape of a JSON report: a summary block plus the raw
/// per-file data.
#[derive(Serialize)]
struct JsonReport<'a> {
    summary: Summary<'a>,
    ratings: &'a BTreeMap<PathBuf, Rating>,
    files: &'a BTreeMap<PathBuf, FileReport>,
    recommendations: &'a [String],
}

#[derive(Serialize)]
struct Summary<'a> {
    total_files: usize,
    files_with_issues: usize,
    total_issues: usize,
    severity_counts: BTreeMap<&'static str, usize>,
    kind_counts: BTreeMap<&'static str, usize>,
    overall: &'a Rating,
    failed_files: Vec<String>,
    duration_ms: u128,
}

/// Renders the report as pretty-printed JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn render(report: &CodebaseReport) -> Result<String> {
    let json = JsonReport {
        summary: Summary {
            total_files: report.total_files(),
            files_with_issues: report.files_with_issues(),
            total_issues: report.total_issues(),
            severity_counts: report.severity_counts(),
            kind_counts: report.kind_counts(),
            overall: &report.overall,
            failed_files: report
                .failed_files()
                .iter()
                .map(|(path, _)| path.display().to_string())
                .collect(),
            duration_ms: report.duration_ms,
        },
        ratings: &report.ratings,
        files: &report.files,
        recommendations: &report.recommendations,
    };

    Ok(serde_json::to_string_pretty(&json)?)
}
