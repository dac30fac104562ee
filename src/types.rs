// src/types.rs
//! Common data structures shared by the engine and the report emitters.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// How severe a finding is. Heuristic detectors flag *risk*, not certain
/// defects, so they emit `Info`; the reserved levels exist for rule classes
/// that can prove a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Label shown in report output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        }
    }
}

/// Which heuristic produced a finding. Closed set; extend here and in
/// `category`/`default_severity` when adding a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    UnusedImport,
    MissingDocstring,
    HardcodedConfig,
    ResourceLeakRisk,
    UnboundedQuery,
    LargeLoop,
    AnalysisFailed,
}

/// Score categories a finding counts against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    ErrorHandling,
    Maintainability,
    Scalability,
    Security,
}

impl IssueKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::UnusedImport => "UNUSED_IMPORT",
            Self::MissingDocstring => "MISSING_DOCSTRING",
            Self::HardcodedConfig => "HARDCODED_CONFIG",
            Self::ResourceLeakRisk => "RESOURCE_LEAK_RISK",
            Self::UnboundedQuery => "UNBOUNDED_QUERY",
            Self::LargeLoop => "LARGE_LOOP",
            Self::AnalysisFailed => "ANALYSIS_FAILED",
        }
    }

    /// Severity is data-driven per rule so future rules can emit
    /// `WARNING`/`ERROR` without touching the aggregation logic.
    #[must_use]
    pub fn default_severity(self) -> Severity {
        match self {
            Self::AnalysisFailed => Severity::Error,
            _ => Severity::Info,
        }
    }

    /// Which score category this kind penalizes. `AnalysisFailed` marks a
    /// file as unscoreable instead of counting against a category.
    #[must_use]
    pub fn category(self) -> Option<Category> {
        match self {
            Self::UnusedImport | Self::MissingDocstring => Some(Category::Maintainability),
            Self::HardcodedConfig
            | Self::ResourceLeakRisk
            | Self::UnboundedQuery
            | Self::LargeLoop => Some(Category::Scalability),
            Self::AnalysisFailed => None,
        }
    }

}

/// A single finding. Immutable once created.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    /// 1-based source line the pattern was observed on.
    pub line: usize,
    pub severity: Severity,
    pub kind: IssueKind,
    pub message: String,
}

impl Issue {
    #[must_use]
    pub fn new(line: usize, kind: IssueKind, message: String) -> Self {
        Self {
            line,
            severity: kind.default_severity(),
            kind,
            message,
        }
    }
}

/// One function/method definition and its cyclomatic-style score.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionComplexity {
    pub name: String,
    pub score: u32,
}

/// Complexity metrics for one file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileMetrics {
    /// Sum of per-function scores; kept as a running total during traversal.
    pub file_complexity: u32,
    pub functions_count: usize,
    pub classes_count: usize,
    pub avg_function_complexity: f64,
    pub max_function_complexity: u32,
    pub functions: Vec<FunctionComplexity>,
}

/// Analysis results for a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub issues: Vec<Issue>,
    /// `None` exactly when the file's analysis failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<FileMetrics>,
}

impl FileReport {
    #[must_use]
    pub fn failed(&self) -> bool {
        self.metrics.is_none()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }
}

/// Category scores and letter grade for a file (or the whole codebase).
#[derive(Debug, Clone, Serialize)]
pub struct Rating {
    pub error_handling: f64,
    pub maintainability: f64,
    pub scalability: f64,
    pub security: f64,
    pub overall: f64,
    pub grade: String,
}

/// Aggregated results for a full analysis run. No mutation after
/// construction; handed to a report emitter as-is.
#[derive(Debug, Clone, Serialize)]
pub struct CodebaseReport {
    pub files: BTreeMap<PathBuf, FileReport>,
    pub ratings: BTreeMap<PathBuf, Rating>,
    pub overall: Rating,
    pub recommendations: Vec<String>,
    pub duration_ms: u128,
}

impl CodebaseReport {
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn files_with_issues(&self) -> usize {
        self.files.values().filter(|f| !f.is_clean()).count()
    }

    #[must_use]
    pub fn total_issues(&self) -> usize {
        self.files.values().map(FileReport::issue_count).sum()
    }

    #[must_use]
    pub fn severity_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for issue in self.files.values().flat_map(|f| &f.issues) {
            *counts.entry(issue.severity.label()).or_insert(0) += 1;
        }
        counts
    }

    #[must_use]
    pub fn kind_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for issue in self.files.values().flat_map(|f| &f.issues) {
            *counts.entry(issue.kind.label()).or_insert(0) += 1;
        }
        counts
    }

    /// Files whose analysis failed, with the recorded failure message.
    #[must_use]
    pub fn failed_files(&self) -> Vec<(&Path, &str)> {
        self.files
            .values()
            .filter(|f| f.failed())
            .map(|f| {
                let message = f
                    .issues
                    .iter()
                    .find(|i| i.kind == IssueKind::AnalysisFailed)
                    .map_or("analysis failed", |i| i.message.as_str());
                (f.path.as_path(), message)
            })
            .collect()
    }

    /// Returns `true` if any finding at `ERROR` severity was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.files
            .values()
            .flat_map(|f| &f.issues)
            .any(|i| i.severity == Severity::Error)
    }
}
