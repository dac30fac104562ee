// src/config/io.rs
//! Loading and saving of `appraise.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::types::{AppraiseToml, Config};

pub const CONFIG_FILE: &str = "appraise.toml";

/// Applies `appraise.toml` from the analysis root, if present. A malformed
/// file is reported and ignored; defaults stay in effect.
pub fn load_toml_config(config: &mut Config) {
    let path = config.root.join(CONFIG_FILE);
    let Ok(content) = fs::read_to_string(&path) else {
        return;
    };
    parse_toml(config, &content);
}

pub fn parse_toml(config: &mut Config, content: &str) {
    match toml::from_str::<AppraiseToml>(content) {
        Ok(parsed) => {
            if let Some(rules) = parsed.rules {
                config.rules = rules;
            }
            if let Some(scoring) = parsed.scoring {
                config.scoring = scoring;
            }
            config.scoring.sort_grades();
        }
        Err(e) => {
            eprintln!("warning: ignoring malformed {CONFIG_FILE}: {e}");
        }
    }
}

/// Writes the current rule and scoring tables back to `appraise.toml`.
///
/// # Errors
/// Returns error if serialization or the file write fails.
pub fn save_to_file(config: &Config, dir: &Path) -> Result<()> {
    let envelope = AppraiseToml {
        rules: Some(config.rules.clone()),
        scoring: Some(config.scoring.clone()),
    };
    let content = toml::to_string_pretty(&envelope).context("serializing configuration")?;
    fs::write(dir.join(CONFIG_FILE), content).context("writing appraise.toml")?;
    Ok(())
}
