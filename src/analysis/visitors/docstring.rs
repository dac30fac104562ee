// src/analysis/visitors/docstring.rs
//! Missing-docstring detection for the module and every class/function
//! definition: the first statement of the body must be a string literal.

use tree_sitter::Node;

use crate::types::{Issue, IssueKind};

pub struct DocstringVisitor {
    missing: Vec<(&'static str, String, usize)>,
}

impl Default for DocstringVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocstringVisitor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            missing: Vec::new(),
        }
    }

    #[must_use]
    pub fn analyze(mut self, root: Node, source: &str) -> Vec<Issue> {
        if !has_docstring(root) {
            self.missing.push(("Module", "module".to_string(), 1));
        }
        self.visit(root, source);

        self.missing
            .into_iter()
            .map(|(label, name, line)| {
                Issue::new(
                    line,
                    IssueKind::MissingDocstring,
                    format!("{label} '{name}' is missing a docstring"),
                )
            })
            .collect()
    }

    fn visit(&mut self, node: Node, source: &str) {
        let label = match node.kind() {
            "function_definition" => Some("Function"),
            "class_definition" => Some("Class"),
            _ => None,
        };

        if let Some(label) = label {
            let documented = node.child_by_field_name("body").is_some_and(has_docstring);
            if !documented {
                let name = node
                    .child_by_field_name("name")
                    .and_then(|n| n.utf8_text(source.as_bytes()).ok())
                    .unwrap_or("<anonymous>")
                    .to_string();
                self.missing
                    .push((label, name, node.start_position().row + 1));
            }
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, source);
        }
    }
}

/// True when the first statement of `body` is a string-literal expression.
/// Comments are tree-sitter extras, not statements, so they are skipped.
fn has_docstring(body: Node) -> bool {
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|c| c.kind() != "comment");
    first.is_some_and(|stmt| {
        stmt.kind() == "expression_statement"
            && stmt.named_child(0).is_some_and(|e| e.kind() == "string")
    })
}
