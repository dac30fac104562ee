// src/analysis/engine.rs
//! Main execution logic for the appraisal engine.
//!
//! File analysis is embarrassingly parallel: each file's traversal is pure
//! and reads only that file's tree. Workers return their `FileReport`s and
//! the merge into the `CodebaseReport` happens sequentially afterwards.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};

use crate::config::Config;
use crate::error::{AppraiseError, Result};
use crate::types::{CodebaseReport, FileReport, Issue, IssueKind};

use super::analyzer::FileAnalyzer;
use super::scoring;

pub struct Engine {
    config: Config,
}

impl Engine {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Analyzes the target set and aggregates the results.
    ///
    /// Per-file failures are contained: a file that cannot be read or
    /// parsed is recorded as an `ANALYSIS_FAILED` issue and the run
    /// continues. Only an empty target set is terminal.
    ///
    /// # Errors
    /// Returns `AppraiseError::EmptyTargetSet` when there is nothing to
    /// analyze.
    pub fn analyze(&self, files: &[PathBuf]) -> Result<CodebaseReport> {
        if files.is_empty() {
            return Err(AppraiseError::EmptyTargetSet {
                root: self.config.root.clone(),
            });
        }

        let start = Instant::now();

        let reports: Vec<FileReport> = if self.config.fail_fast {
            self.analyze_fail_fast(files)
        } else {
            files.par_iter().map(|path| self.analyze_file(path)).collect()
        };

        // Single-writer merge: the only synchronization point.
        let mut file_map = BTreeMap::new();
        for report in reports {
            file_map.insert(report.path.clone(), report);
        }

        let ratings = scoring::rate_files(&file_map, &self.config.scoring);
        let overall = scoring::rate_codebase(&file_map, &self.config.scoring);
        let recommendations =
            scoring::recommend(&file_map, self.config.rules.recommendation_threshold);

        Ok(CodebaseReport {
            files: file_map,
            ratings,
            overall,
            recommendations,
            duration_ms: start.elapsed().as_millis(),
        })
    }

    /// Sequential variant that stops submitting work after the first
    /// failed file. The failure itself is still part of the report.
    fn analyze_fail_fast(&self, files: &[PathBuf]) -> Vec<FileReport> {
        let mut reports = Vec::new();
        for path in files {
            let report = self.analyze_file(path);
            let failed = report.failed();
            reports.push(report);
            if failed {
                break;
            }
        }
        reports
    }

    fn analyze_file(&self, path: &Path) -> FileReport {
        if self.config.verbose {
            eprintln!("analyzing {}", path.display());
        }

        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => return failed_report(path, &e.to_string()),
        };

        match FileAnalyzer::new(&self.config.rules).analyze(path, &source) {
            Ok(report) => report,
            Err(e) => failed_report(path, &e.to_string()),
        }
    }
}

fn failed_report(path: &Path, reason: &str) -> FileReport {
    FileReport {
        path: path.to_path_buf(),
        issues: vec![Issue::new(
            1,
            IssueKind::AnalysisFailed,
            format!("Error analyzing {}: {reason}", path.display()),
        )],
        metrics: None,
    }
}
