// src/analysis/analyzer.rs
//! Per-file analysis: parses the file, runs the visitor set, and merges
//! their findings into one report.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tree_sitter::Node;

use crate::config::RuleConfig;
use crate::error::{AppraiseError, Result};
use crate::lang::Lang;
use crate::types::{FileReport, Issue};

use super::provider::TreeProvider;
use super::visitors::{
    ComplexityVisitor, DocstringVisitor, ImportUsageVisitor, ScalabilityVisitor,
};

pub struct FileAnalyzer<'a> {
    rules: &'a RuleConfig,
}

impl<'a> FileAnalyzer<'a> {
    #[must_use]
    pub fn new(rules: &'a RuleConfig) -> Self {
        Self { rules }
    }

    /// Analyzes one file's source text.
    ///
    /// # Errors
    /// Returns `AppraiseError::Parse` when the source cannot be turned into
    /// a tree. A single rule failing on a parseable file is contained: the
    /// rule is skipped for this file and the rest of the analysis proceeds.
    pub fn analyze(&self, path: &Path, source: &str) -> Result<FileReport> {
        let provider = TreeProvider::new(Lang::Python);
        let tree = provider.parse(path, source)?;
        let root = tree.root_node();

        let metrics = run_rule(path, "complexity", || {
            ComplexityVisitor::new().analyze(root, source)
        })
        .unwrap_or_default();

        let mut issues = self.collect_issues(path, root, source);

        // Visitors run independently; a stable line sort with registration
        // order as the tie-break gives the merged sequence its contract.
        issues.sort_by_key(|i| i.line);

        debug_assert!(issues
            .iter()
            .all(|i| i.line >= 1 && i.line <= source.lines().count().max(1)));

        Ok(FileReport {
            path: path.to_path_buf(),
            issues,
            metrics: Some(metrics),
        })
    }

    fn collect_issues(&self, path: &Path, root: Node, source: &str) -> Vec<Issue> {
        let threshold = self.rules.large_loop_threshold;
        let detectors: [(&'static str, Box<dyn FnOnce() -> Vec<Issue> + '_>); 3] = [
            (
                "scalability",
                Box::new(move || ScalabilityVisitor::new(threshold).analyze(root, source)),
            ),
            (
                "imports",
                Box::new(move || ImportUsageVisitor::new().analyze(root, source)),
            ),
            (
                "docstring",
                Box::new(move || DocstringVisitor::new().analyze(root, source)),
            ),
        ];

        let mut issues = Vec::new();
        for (name, detector) in detectors {
            if let Some(batch) = run_rule(path, name, detector) {
                issues.extend(batch);
            }
        }
        issues
    }
}

/// Contains a panicking rule at file granularity: log and skip, never
/// abort the run.
fn run_rule<T>(path: &Path, name: &'static str, rule: impl FnOnce() -> T) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(rule)) {
        Ok(value) => Some(value),
        Err(_) => {
            let failure = AppraiseError::Visitor {
                visitor: name,
                path: path.to_path_buf(),
            };
            eprintln!("warning: {failure}; skipping the rule for this file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IssueKind;
    use std::path::PathBuf;

    fn analyze(code: &str) -> FileReport {
        let rules = RuleConfig::default();
        FileAnalyzer::new(&rules)
            .analyze(&PathBuf::from("sample.py"), code)
            .expect("analysis should succeed")
    }

    #[test]
    fn merges_visitor_findings_in_line_order() {
        let code = "import sys\n\nMAX_SIZE = 10\n\ndef f():\n    pass\n";
        let report = analyze(code);

        let lines: Vec<usize> = report.issues.iter().map(|i| i.line).collect();
        let mut sorted = lines.clone();
        sorted.sort_unstable();
        assert_eq!(lines, sorted);

        let kinds: Vec<IssueKind> = report.issues.iter().map(|i| i.kind).collect();
        assert!(kinds.contains(&IssueKind::UnusedImport));
        assert!(kinds.contains(&IssueKind::HardcodedConfig));
        assert!(kinds.contains(&IssueKind::MissingDocstring));
    }

    #[test]
    fn same_line_ties_follow_registration_order() {
        // Line 1 carries both the module docstring finding (docstring
        // visitor, registered last) and the unused import (imports visitor).
        let code = "import sys\n";
        let report = analyze(code);
        let kinds: Vec<IssueKind> = report.issues.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![IssueKind::UnusedImport, IssueKind::MissingDocstring]
        );
    }

    #[test]
    fn metrics_present_on_success() {
        let report = analyze("\"\"\"doc\"\"\"\n\ndef f():\n    \"\"\"doc\"\"\"\n    return 1\n");
        let metrics = report.metrics.as_ref().expect("metrics");
        assert_eq!(metrics.functions_count, 1);
        assert!(report.is_clean());
    }

    #[test]
    fn parse_failure_propagates() {
        let rules = RuleConfig::default();
        let result = FileAnalyzer::new(&rules).analyze(&PathBuf::from("bad.py"), "def broken(:\n");
        assert!(result.is_err());
    }
}
