// src/analysis/provider.rs
//! Syntax tree provider. The engine only consumes node kind, children and
//! source positions; everything parser-specific stays behind this seam.

use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use crate::error::{AppraiseError, Result};
use crate::lang::Lang;

pub struct TreeProvider {
    lang: Lang,
}

impl TreeProvider {
    #[must_use]
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    /// Parses one file's text into a tree.
    ///
    /// # Errors
    /// Returns `AppraiseError::Parse` when the parser yields no tree or the
    /// tree contains syntax errors; callers downgrade this to an
    /// `ANALYSIS_FAILED` issue rather than aborting the run.
    pub fn parse(&self, path: &Path, source: &str) -> Result<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(self.lang.grammar())
            .map_err(|e| AppraiseError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let Some(tree) = parser.parse(source, None) else {
            return Err(AppraiseError::Parse {
                path: path.to_path_buf(),
                reason: "parser produced no tree".to_string(),
            });
        };

        let root = tree.root_node();
        if root.has_error() {
            let reason = first_error_row(root).map_or_else(
                || "syntax error".to_string(),
                |row| format!("syntax error near line {}", row + 1),
            );
            return Err(AppraiseError::Parse {
                path: path.to_path_buf(),
                reason,
            });
        }

        Ok(tree)
    }
}

fn first_error_row(node: Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error_row)
}
