// src/config/types.rs
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// `range(n)` loops at or above this bound are flagged.
    #[serde(default = "default_large_loop_threshold")]
    pub large_loop_threshold: u64,
    /// An issue kind contributes a recommendation once its codebase-wide
    /// count exceeds this.
    #[serde(default)]
    pub recommendation_threshold: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            large_loop_threshold: default_large_loop_threshold(),
            recommendation_threshold: 0,
        }
    }
}

const fn default_large_loop_threshold() -> u64 {
    1000
}

/// One row of the grade policy table: scores at or above `min` earn `label`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeBand {
    pub min: f64,
    pub label: String,
}

impl GradeBand {
    fn new(min: f64, label: &str) -> Self {
        Self {
            min,
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_error_handling_penalty")]
    pub error_handling_penalty: f64,
    #[serde(default = "default_maintainability_penalty")]
    pub maintainability_penalty: f64,
    #[serde(default = "default_scalability_penalty")]
    pub scalability_penalty: f64,
    #[serde(default = "default_security_penalty")]
    pub security_penalty: f64,
    /// Grade thresholds, a policy table rather than an algorithm. Kept
    /// sorted descending by `min` so lookup stays monotonic.
    #[serde(default = "default_grades")]
    pub grades: Vec<GradeBand>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            error_handling_penalty: default_error_handling_penalty(),
            maintainability_penalty: default_maintainability_penalty(),
            scalability_penalty: default_scalability_penalty(),
            security_penalty: default_security_penalty(),
            grades: default_grades(),
        }
    }
}

impl ScoringConfig {
    /// Letter grade for a 0-10 score: first band whose threshold the score
    /// meets, `F` below every band.
    #[must_use]
    pub fn grade_for(&self, score: f64) -> String {
        self.grades
            .iter()
            .find(|band| score >= band.min)
            .map_or_else(|| "F".to_string(), |band| band.label.clone())
    }

    pub fn sort_grades(&mut self) {
        self.grades
            .sort_by(|a, b| b.min.partial_cmp(&a.min).unwrap_or(std::cmp::Ordering::Equal));
    }
}

const fn default_error_handling_penalty() -> f64 {
    0.5
}
const fn default_maintainability_penalty() -> f64 {
    0.3
}
const fn default_scalability_penalty() -> f64 {
    0.4
}
const fn default_security_penalty() -> f64 {
    2.0
}

fn default_grades() -> Vec<GradeBand> {
    vec![
        GradeBand::new(9.5, "A+"),
        GradeBand::new(8.5, "A"),
        GradeBand::new(7.0, "B"),
        GradeBand::new(5.0, "C"),
        GradeBand::new(3.5, "D"),
    ]
}

/// On-disk shape of `appraise.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppraiseToml {
    #[serde(default)]
    pub rules: Option<RuleConfig>,
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub include_patterns: Vec<regex::Regex>,
    pub exclude_patterns: Vec<regex::Regex>,
    pub verbose: bool,
    pub fail_fast: bool,
    pub rules: RuleConfig,
    pub scoring: ScoringConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            verbose: false,
            fail_fast: false,
            rules: RuleConfig::default(),
            scoring: ScoringConfig::default(),
        }
    }
}
