// src/report/markdown.rs
//! Markdown report: executive summary, issue breakdown, ratings,
//! recommendations, and the failed-file appendix.

use std::fmt::Write;

use crate::types::CodebaseReport;

#[must_use]
pub fn render(report: &CodebaseReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Code Quality Analysis Report\n");

    render_summary(report, &mut out);
    render_issue_breakdown(report, &mut out);
    render_ratings(report, &mut out);
    render_recommendations(report, &mut out);
    render_failed(report, &mut out);

    out
}

fn render_summary(report: &CodebaseReport, out: &mut String) {
    let total = report.total_files();
    let with_issues = report.files_with_issues();
    let issues = report.total_issues();
    let overall = &report.overall;

    let _ = writeln!(out, "## Executive Summary\n");
    let _ = writeln!(
        out,
        "This analysis examined **{total}** files and found issues in **{with_issues}** files \
         with a total of **{issues}** issues identified.\n"
    );
    let _ = writeln!(
        out,
        "**Overall Codebase Grade: {}** ({:.1}/10)\n",
        overall.grade, overall.overall
    );

    let _ = writeln!(out, "### Key Metrics\n");
    let _ = writeln!(out, "| Metric | Score (0-10) |");
    let _ = writeln!(out, "|--------|-------------|");
    let _ = writeln!(out, "| Overall Quality | {:.1} |", overall.overall);
    let _ = writeln!(out, "| Error Handling | {:.1} |", overall.error_handling);
    let _ = writeln!(out, "| Maintainability | {:.1} |", overall.maintainability);
    let _ = writeln!(out, "| Scalability | {:.1} |", overall.scalability);
    let _ = writeln!(out, "| Security | {:.1} |\n", overall.security);
}

fn render_issue_breakdown(report: &CodebaseReport, out: &mut String) {
    let total = report.total_issues();

    let _ = writeln!(out, "## Issue Summary\n");

    let _ = writeln!(out, "### Issues by Severity\n");
    let _ = writeln!(out, "| Severity | Count |");
    let _ = writeln!(out, "|----------|-------|");
    for (severity, count) in report.severity_counts() {
        let _ = writeln!(out, "| {severity} | {count} |");
    }
    let _ = writeln!(out);

    if total > 0 {
        let _ = writeln!(out, "### Issues by Kind\n");
        let _ = writeln!(out, "| Issue Kind | Count | % of Total |");
        let _ = writeln!(out, "|------------|-------|------------|");

        let mut kinds: Vec<(&str, usize)> = report.kind_counts().into_iter().collect();
        kinds.sort_by(|a, b| b.1.cmp(&a.1));

        #[allow(clippy::cast_precision_loss)]
        for (kind, count) in kinds {
            let percentage = count as f64 / total as f64 * 100.0;
            let _ = writeln!(out, "| {kind} | {count} | {percentage:.1}% |");
        }
        let _ = writeln!(out);
    }
}

fn render_ratings(report: &CodebaseReport, out: &mut String) {
    if report.ratings.is_empty() {
        return;
    }

    let _ = writeln!(out, "## File Ratings\n");
    let _ = writeln!(
        out,
        "| File | Grade | Overall | Error | Maintainability | Scalability | Security | Issues |"
    );
    let _ = writeln!(
        out,
        "|------|-------|---------|-------|----------------|-------------|----------|--------|"
    );

    for (path, rating) in &report.ratings {
        let issue_count = report.files.get(path).map_or(0, |f| f.issue_count());
        let _ = writeln!(
            out,
            "| {} | {} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} | {issue_count} |",
            path.display(),
            rating.grade,
            rating.overall,
            rating.error_handling,
            rating.maintainability,
            rating.scalability,
            rating.security
        );
    }
    let _ = writeln!(out);
}

fn render_recommendations(report: &CodebaseReport, out: &mut String) {
    if report.recommendations.is_empty() {
        return;
    }
    let _ = writeln!(out, "## Key Recommendations\n");
    for (i, rec) in report.recommendations.iter().enumerate() {
        let _ = writeln!(out, "{}. {rec}", i + 1);
    }
    let _ = writeln!(out);
}

fn render_failed(report: &CodebaseReport, out: &mut String) {
    let failed = report.failed_files();
    if failed.is_empty() {
        return;
    }
    let _ = writeln!(out, "## Files That Failed Analysis\n");
    for (path, message) in failed {
        let _ = writeln!(out, "- `{}`: {message}", path.display());
    }
    let _ = writeln!(out);
}
