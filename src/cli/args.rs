// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::report::Format;

#[derive(Parser)]
#[command(name = "appraise", version, about = "Static code quality appraisal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Print each file as it is analyzed
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Stop submitting new files after the first analysis failure
    #[arg(long, global = true)]
    pub fail_fast: bool,
    /// Only analyze paths matching these regexes
    #[arg(long, global = true, value_name = "REGEX")]
    pub include: Vec<String>,
    /// Skip paths matching these regexes
    #[arg(long, global = true, value_name = "REGEX")]
    pub exclude: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a directory and print the console report (the default)
    Scan {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Write a default appraise.toml to the target directory
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Render a report in the chosen format
    Report {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long, value_enum, default_value = "markdown")]
        format: Format,
        /// Write to a file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}
