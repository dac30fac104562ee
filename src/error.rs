// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppraiseError {
    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("visitor '{visitor}' failed on {path}")]
    Visitor {
        visitor: &'static str,
        path: PathBuf,
    },

    #[error("no Python source files found under {root}")]
    EmptyTargetSet { root: PathBuf },

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, AppraiseError>;

// Allow `?` on std::io::Error by converting to AppraiseError::Io with unknown path.
impl From<std::io::Error> for AppraiseError {
    fn from(source: std::io::Error) -> Self {
        AppraiseError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

// Gracefully convert WalkDir errors
impl From<walkdir::Error> for AppraiseError {
    fn from(e: walkdir::Error) -> Self {
        let path = e
            .path()
            .map_or_else(|| PathBuf::from("<unknown>"), std::path::Path::to_path_buf);
        match e.into_io_error() {
            Some(source) => AppraiseError::Io { source, path },
            None => AppraiseError::Io {
                source: std::io::Error::new(std::io::ErrorKind::Other, "walk error"),
                path,
            },
        }
    }
}
