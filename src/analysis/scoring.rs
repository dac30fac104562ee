// src/analysis/scoring.rs
//! Category scoring, letter grades, and recommendation synthesis.
//!
//! Every category starts at 10.0 and loses a fixed penalty per matching
//! issue; categories with no contributing rule yet (`error_handling`,
//! `security`) stay at 10.0 until a future rule feeds them.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::ScoringConfig;
use crate::types::{Category, FileReport, Issue, IssueKind, Rating};

/// Per-file ratings. Failed files are never rated.
#[must_use]
pub fn rate_files(
    files: &BTreeMap<PathBuf, FileReport>,
    cfg: &ScoringConfig,
) -> BTreeMap<PathBuf, Rating> {
    files
        .iter()
        .filter(|(_, report)| !report.failed())
        .map(|(path, report)| (path.clone(), rate(report.issues.iter(), cfg)))
        .collect()
}

/// Codebase-level rating: the same penalty table applied over all issues
/// of every successfully analyzed file.
#[must_use]
pub fn rate_codebase(files: &BTreeMap<PathBuf, FileReport>, cfg: &ScoringConfig) -> Rating {
    let issues = files
        .values()
        .filter(|report| !report.failed())
        .flat_map(|report| report.issues.iter());
    rate(issues, cfg)
}

fn rate<'a>(issues: impl Iterator<Item = &'a Issue>, cfg: &ScoringConfig) -> Rating {
    let mut error_handling = 10.0;
    let mut maintainability = 10.0;
    let mut scalability = 10.0;
    let mut security = 10.0;

    for issue in issues {
        match issue.kind.category() {
            Some(Category::ErrorHandling) => error_handling -= cfg.error_handling_penalty,
            Some(Category::Maintainability) => maintainability -= cfg.maintainability_penalty,
            Some(Category::Scalability) => scalability -= cfg.scalability_penalty,
            Some(Category::Security) => security -= cfg.security_penalty,
            None => {}
        }
    }

    error_handling = clamp(error_handling);
    maintainability = clamp(maintainability);
    scalability = clamp(scalability);
    security = clamp(security);

    let overall = clamp((error_handling + maintainability + scalability + security) / 4.0);

    Rating {
        error_handling,
        maintainability,
        scalability,
        security,
        overall,
        grade: cfg.grade_for(overall),
    }
}

fn clamp(score: f64) -> f64 {
    score.clamp(0.0, 10.0)
}

/// Free-text recommendations for every issue kind whose codebase-wide
/// count exceeds the threshold.
#[must_use]
pub fn recommend(files: &BTreeMap<PathBuf, FileReport>, threshold: usize) -> Vec<String> {
    let count_of = |kind: IssueKind| {
        files
            .values()
            .flat_map(|f| &f.issues)
            .filter(|i| i.kind == kind)
            .count()
    };

    let mut out = Vec::new();

    if count_of(IssueKind::MissingDocstring) > threshold {
        out.push(
            "Add docstrings to all modules, classes, and functions to improve code clarity and maintainability."
                .to_string(),
        );
    }
    if count_of(IssueKind::UnusedImport) > threshold {
        out.push("Remove unused imports to reduce code clutter and improve performance.".to_string());
    }
    if count_of(IssueKind::HardcodedConfig) > threshold {
        out.push(
            "Move hardcoded configuration values to configuration files or environment variables."
                .to_string(),
        );
    }
    if count_of(IssueKind::UnboundedQuery) + count_of(IssueKind::LargeLoop) > threshold {
        out.push(
            "Review and optimize potential bottlenecks, particularly in data processing and database operations."
                .to_string(),
        );
    }
    if count_of(IssueKind::ResourceLeakRisk) > threshold {
        out.push(
            "Ensure proper resource management with context managers for files, connections, etc."
                .to_string(),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Issue;

    fn issue(kind: IssueKind) -> Issue {
        Issue::new(1, kind, "test".to_string())
    }

    fn rate_issues(issues: &[Issue]) -> Rating {
        rate(issues.iter(), &ScoringConfig::default())
    }

    #[test]
    fn clean_file_scores_perfect() {
        let r = rate_issues(&[]);
        assert_eq!(r.overall, 10.0);
        assert_eq!(r.grade, "A+");
    }

    #[test]
    fn maintainability_penalized_per_issue() {
        let issues = vec![
            issue(IssueKind::MissingDocstring),
            issue(IssueKind::UnusedImport),
        ];
        let r = rate_issues(&issues);
        assert!((r.maintainability - 9.4).abs() < 1e-9);
        assert_eq!(r.scalability, 10.0);
        assert_eq!(r.error_handling, 10.0);
        assert_eq!(r.security, 10.0);
    }

    #[test]
    fn scalability_penalized_per_issue() {
        let issues = vec![
            issue(IssueKind::HardcodedConfig),
            issue(IssueKind::LargeLoop),
            issue(IssueKind::UnboundedQuery),
        ];
        let r = rate_issues(&issues);
        assert!((r.scalability - 8.8).abs() < 1e-9);
        assert_eq!(r.maintainability, 10.0);
    }

    #[test]
    fn scores_clamp_at_zero() {
        let issues: Vec<Issue> = (0..100).map(|_| issue(IssueKind::MissingDocstring)).collect();
        let r = rate_issues(&issues);
        assert_eq!(r.maintainability, 0.0);
        assert!(r.overall >= 0.0);
    }

    #[test]
    fn analysis_failed_does_not_penalize_categories() {
        let issues = vec![issue(IssueKind::AnalysisFailed)];
        let r = rate_issues(&issues);
        assert_eq!(r.overall, 10.0);
    }

    #[test]
    fn grades_are_monotonic_in_score() {
        let cfg = ScoringConfig::default();
        let order = ["A+", "A", "B", "C", "D", "F"];
        let mut last_rank = 0;
        let mut score = 10.0;
        while score >= 0.0 {
            let grade = cfg.grade_for(score);
            let rank = order
                .iter()
                .position(|g| *g == grade)
                .expect("grade from default table");
            assert!(rank >= last_rank, "score {score} improved the grade");
            last_rank = rank;
            score -= 0.1;
        }
    }

    #[test]
    fn grade_boundaries_match_policy() {
        let cfg = ScoringConfig::default();
        assert_eq!(cfg.grade_for(9.5), "A+");
        assert_eq!(cfg.grade_for(9.4), "A");
        assert_eq!(cfg.grade_for(8.5), "A");
        assert_eq!(cfg.grade_for(7.0), "B");
        assert_eq!(cfg.grade_for(5.0), "C");
        assert_eq!(cfg.grade_for(3.5), "D");
        assert_eq!(cfg.grade_for(0.0), "F");
    }
}
