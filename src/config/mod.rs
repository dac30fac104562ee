// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::types::{AppraiseToml, Config, GradeBand, RuleConfig, ScoringConfig};

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config rooted at `root` and applies local settings
    /// (`appraise.toml`) when present.
    #[must_use]
    pub fn load(root: std::path::PathBuf) -> Self {
        let mut config = Self {
            root,
            ..Self::default()
        };
        io::load_toml_config(&mut config);
        config
    }
}
