// src/report/console.rs
use colored::Colorize;
use std::path::Path;

use crate::types::{CodebaseReport, Severity};

/// Prints a formatted report to stdout: per-file findings, the ratings
/// table, and recommendations.
pub fn print_report(report: &CodebaseReport) {
    print_header(report);
    print_issues(report);
    print_failed(report);
    print_ratings(report);
    print_recommendations(report);
}

fn print_header(report: &CodebaseReport) {
    let total = report.total_files();
    let with_issues = report.files_with_issues();
    let issues = report.total_issues();

    if issues == 0 {
        println!(
            "{} Analyzed {total} files in {}ms. No issues found.",
            "OK".green().bold(),
            report.duration_ms
        );
        return;
    }

    println!(
        "Analyzed {total} files in {}ms: {with_issues} with issues, {issues} issues total.",
        report.duration_ms
    );
    println!();
}

fn print_issues(report: &CodebaseReport) {
    for file in report.files.values() {
        if file.is_clean() || file.failed() {
            continue;
        }
        println!("{}", file.path.display().to_string().bold());
        for issue in &file.issues {
            let line = format!(
                "  line {}: {} - {}",
                issue.line,
                issue.kind.label(),
                issue.message
            );
            match issue.severity {
                Severity::Error => println!("{}", line.red()),
                Severity::Warning => println!("{}", line.yellow()),
                Severity::Info => println!("{}", line.dimmed()),
            }
        }
        println!();
    }
}

fn print_failed(report: &CodebaseReport) {
    let failed = report.failed_files();
    if failed.is_empty() {
        return;
    }
    println!("{}", "Failed files:".red().bold());
    for (path, message) in failed {
        println!("  {}: {message}", path.display());
    }
    println!();
}

fn print_ratings(report: &CodebaseReport) {
    if report.ratings.is_empty() {
        return;
    }

    println!("{}", "File Ratings:".bold());
    println!(
        "{:<40} {:<6} {:<8} {:<8} {:<8} {:<8} {:<8}",
        "File", "Grade", "Overall", "Error", "Maint.", "Scale.", "Security"
    );
    for (path, rating) in &report.ratings {
        println!(
            "{:<40} {:<6} {:<8.1} {:<8.1} {:<8.1} {:<8.1} {:<8.1}",
            shorten_path(path, 39),
            rating.grade,
            rating.overall,
            rating.error_handling,
            rating.maintainability,
            rating.scalability,
            rating.security
        );
    }
    println!();

    let overall = &report.overall;
    println!(
        "Overall Codebase Grade: {} ({:.1}/10)",
        overall.grade.bold(),
        overall.overall
    );
    println!();
}

fn print_recommendations(report: &CodebaseReport) {
    if report.recommendations.is_empty() {
        return;
    }
    println!("{}", "Recommendations:".bold());
    for (i, rec) in report.recommendations.iter().enumerate() {
        println!("  {}. {rec}", i + 1);
    }
}

/// Shortens a path to fit within `max_length` characters, keeping the
/// first and last components.
fn shorten_path(path: &Path, max_length: usize) -> String {
    let s = path.display().to_string();
    if s.len() <= max_length {
        return s;
    }

    let parts: Vec<&str> = s.split(['/', '\\']).collect();
    if parts.len() > 2 {
        let first = parts[0];
        let last = parts[parts.len() - 1];
        let shortened = format!("{first}/.../{last}");
        if shortened.len() <= max_length {
            return shortened;
        }
    }

    let tail: String = s
        .chars()
        .skip(s.chars().count().saturating_sub(max_length.saturating_sub(3)))
        .collect();
    format!("...{tail}")
}
