// src/cli/mod.rs
pub mod args;

pub use args::{Cli, Commands};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;

use crate::analysis::Engine;
use crate::config::Config;
use crate::discovery;
use crate::report::{self, Format};
use crate::types::CodebaseReport;

/// Runs a scan and prints the console report. Returns the report so the
/// caller can decide the exit code.
///
/// # Errors
/// Returns error on configuration failures (bad patterns, empty target set).
pub fn handle_scan(path: &Path, cli: &Cli) -> Result<CodebaseReport> {
    let report = run_analysis(path, cli)?;
    report::console::print_report(&report);
    Ok(report)
}

/// Runs a scan and renders the chosen emitter to stdout or a file.
///
/// # Errors
/// Returns error on configuration failures or if the output file cannot
/// be written.
pub fn handle_report(
    path: &Path,
    format: Format,
    output: Option<&Path>,
    cli: &Cli,
) -> Result<CodebaseReport> {
    let report = run_analysis(path, cli)?;

    let rendered = match format {
        Format::Console => {
            report::console::print_report(&report);
            return Ok(report);
        }
        Format::Markdown => report::markdown::render(&report),
        Format::Json => report::json::render(&report)?,
    };

    match output {
        Some(file) => {
            fs::write(file, rendered)
                .with_context(|| format!("writing report to {}", file.display()))?;
            eprintln!("Report written to {}", file.display());
        }
        None => print!("{rendered}"),
    }

    Ok(report)
}

/// Writes a default `appraise.toml` to `path`, refusing to overwrite an
/// existing one.
///
/// # Errors
/// Returns error if the file cannot be written.
pub fn handle_init(path: &Path) -> Result<()> {
    let target = path.join(crate::config::io::CONFIG_FILE);
    if target.exists() {
        eprintln!("{} already exists, leaving it untouched", target.display());
        return Ok(());
    }
    crate::config::io::save_to_file(&Config::new(), path)?;
    eprintln!("Created {}", target.display());
    Ok(())
}

fn run_analysis(path: &Path, cli: &Cli) -> Result<CodebaseReport> {
    let config = build_config(path, cli)?;
    let files = discovery::discover(&config)?;
    let report = Engine::new(config).analyze(&files)?;
    Ok(report)
}

fn build_config(path: &Path, cli: &Cli) -> Result<Config> {
    let mut config = Config::load(path.to_path_buf());
    config.verbose = cli.verbose;
    config.fail_fast = cli.fail_fast;
    config.include_patterns = compile_patterns(&cli.include)?;
    config.exclude_patterns = compile_patterns(&cli.exclude)?;
    Ok(config)
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("invalid pattern '{p}'")))
        .collect()
}

/// Resolves the target path for the default (no subcommand) invocation.
#[must_use]
pub fn default_path() -> PathBuf {
    PathBuf::from(".")
}
