// src/bin/appraise.rs
use std::process;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use appraise_core::cli::{self, Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let report = match &cli.command {
        Some(Commands::Scan { path }) => cli::handle_scan(path, &cli)?,
        Some(Commands::Init { path }) => {
            cli::handle_init(path)?;
            return Ok(());
        }
        Some(Commands::Report {
            path,
            format,
            output,
        }) => cli::handle_report(path, *format, output.as_deref(), &cli)?,
        None => cli::handle_scan(&cli::default_path(), &cli)?,
    };

    if report.has_errors() {
        process::exit(1);
    }
    Ok(())
}
