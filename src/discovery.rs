// src/discovery.rs
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;
use crate::constants::should_prune;
use crate::error::Result;
use crate::lang::Lang;

/// Runs the file discovery pipeline: walk the root, prune junk
/// directories, keep analyzable sources, apply include/exclude patterns.
///
/// # Errors
/// Discovery itself is best-effort; walk errors are counted and reported
/// in verbose mode rather than aborting.
pub fn discover(config: &Config) -> Result<Vec<PathBuf>> {
    let raw_files = walk_filesystem(&config.root, config.verbose);
    let analyzable = raw_files.into_iter().filter(|p| is_analyzable(p)).collect();
    let mut files = filter_config(analyzable, config);
    files.sort();
    Ok(files)
}

fn walk_filesystem(root: &Path, verbose: bool) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !should_prune(&e.file_name().to_string_lossy()));

    let mut paths = Vec::new();
    let mut errors = 0;
    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    paths.push(entry.path().to_path_buf());
                }
            }
            Err(_) => errors += 1,
        }
    }

    if errors > 0 && verbose {
        eprintln!("warning: encountered {errors} errors during file walk");
    }
    paths
}

fn is_analyzable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Lang::from_ext)
        .is_some()
}

/// Normalizes a path to use forward slashes (cross-platform pattern matching).
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn filter_config(mut paths: Vec<PathBuf>, config: &Config) -> Vec<PathBuf> {
    if !config.include_patterns.is_empty() {
        paths.retain(|p| {
            let s = normalize_path(p);
            config.include_patterns.iter().any(|re| re.is_match(&s))
        });
    }

    if !config.exclude_patterns.is_empty() {
        paths.retain(|p| {
            let s = normalize_path(p);
            !config.exclude_patterns.iter().any(|re| re.is_match(&s))
        });
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(root: &Path) -> Config {
        Config {
            root: root.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn finds_python_files_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();
        fs::write(dir.path().join("b.txt"), "not code").unwrap();

        let files = discover(&config_for(dir.path())).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.py"));
    }

    #[test]
    fn prunes_cache_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("__pycache__")).unwrap();
        fs::write(dir.path().join("__pycache__/cached.py"), "x = 1\n").unwrap();
        fs::write(dir.path().join("real.py"), "x = 1\n").unwrap();

        let files = discover(&config_for(dir.path())).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("real.py"));
    }

    #[test]
    fn exclude_patterns_filter_paths() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("keep.py"), "x = 1\n").unwrap();
        fs::write(dir.path().join("skip_test.py"), "x = 1\n").unwrap();

        let mut config = config_for(dir.path());
        config.exclude_patterns = vec![regex::Regex::new(r"_test\.py$").unwrap()];

        let files = discover(&config).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("keep.py"));
    }

    #[test]
    fn output_is_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("z.py"), "x = 1\n").unwrap();
        fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();

        let files = discover(&config_for(dir.path())).unwrap();
        assert!(files[0].ends_with("a.py"));
        assert!(files[1].ends_with("z.py"));
    }
}
