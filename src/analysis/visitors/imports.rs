// src/analysis/visitors/imports.rs
//! Unused-import detection. Collects the binding names introduced by
//! module-scope import statements, then the identifier references used
//! anywhere else; imports whose binding is never referenced are reported.

use std::collections::HashSet;

use tree_sitter::Node;

use crate::types::{Issue, IssueKind};

pub struct ImportUsageVisitor {
    /// Binding name and import-statement line, in source order.
    imports: Vec<(String, usize)>,
    used: HashSet<String>,
}

impl Default for ImportUsageVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportUsageVisitor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            imports: Vec::new(),
            used: HashSet::new(),
        }
    }

    #[must_use]
    pub fn analyze(mut self, root: Node, source: &str) -> Vec<Issue> {
        self.visit(root, source);

        let mut reported = HashSet::new();
        self.imports
            .iter()
            .filter(|(name, _)| !self.used.contains(name) && reported.insert(name.clone()))
            .map(|(name, line)| {
                Issue::new(
                    *line,
                    IssueKind::UnusedImport,
                    format!("Import '{name}' might be unused"),
                )
            })
            .collect()
    }

    fn visit(&mut self, node: Node, source: &str) {
        match node.kind() {
            // Import statements introduce bindings; their own identifiers
            // are not references, so the subtree is not descended into.
            "import_statement" => {
                if at_module_scope(node) {
                    self.collect_plain_import(node, source);
                }
                return;
            }
            "import_from_statement" => {
                if at_module_scope(node) {
                    self.collect_from_import(node, source);
                }
                return;
            }
            "identifier" => {
                if is_reference(node) {
                    if let Ok(name) = node.utf8_text(source.as_bytes()) {
                        self.used.insert(name.to_string());
                    }
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, source);
        }
    }

    /// `import a.b` binds `a`; `import a.b as c` binds `c`.
    fn collect_plain_import(&mut self, node: Node, source: &str) {
        let line = node.start_position().row + 1;
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "dotted_name" => {
                    if let Some(root_segment) = child.named_child(0) {
                        if let Ok(name) = root_segment.utf8_text(source.as_bytes()) {
                            self.imports.push((name.to_string(), line));
                        }
                    }
                }
                "aliased_import" => {
                    if let Some(alias) = child.child_by_field_name("alias") {
                        if let Ok(name) = alias.utf8_text(source.as_bytes()) {
                            self.imports.push((name.to_string(), line));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// `from m import x` binds `x`; `from m import x as y` binds `y`;
    /// wildcard imports introduce nothing checkable.
    fn collect_from_import(&mut self, node: Node, source: &str) {
        let line = node.start_position().row + 1;
        let mut cursor = node.walk();
        for child in node.children_by_field_name("name", &mut cursor) {
            match child.kind() {
                "dotted_name" => {
                    if let Ok(name) = child.utf8_text(source.as_bytes()) {
                        self.imports.push((name.to_string(), line));
                    }
                }
                "aliased_import" => {
                    if let Some(alias) = child.child_by_field_name("alias") {
                        if let Ok(name) = alias.utf8_text(source.as_bytes()) {
                            self.imports.push((name.to_string(), line));
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

fn at_module_scope(node: Node) -> bool {
    node.parent().is_some_and(|p| p.kind() == "module")
}

/// An identifier is a name reference unless it is the member half of an
/// attribute access or a keyword-argument name.
fn is_reference(node: Node) -> bool {
    let Some(parent) = node.parent() else {
        return true;
    };
    let field_match = |field: &str| {
        parent
            .child_by_field_name(field)
            .is_some_and(|n| n.id() == node.id())
    };
    match parent.kind() {
        "attribute" => !field_match("attribute"),
        "keyword_argument" => !field_match("name"),
        _ => true,
    }
}
