// src/analysis/visitors/complexity.rs
//! Cyclomatic-style complexity metrics.
//!
//! Each function/method starts at 1 (the baseline path) and gains one point
//! per branch node (`if`/`elif`, `while`, `for`), one per exception-handler
//! clause, and one per short-circuit boolean operator. Nested definitions
//! are scored as their own entries, not folded into the enclosing function.

use tree_sitter::Node;

use crate::types::{FileMetrics, FunctionComplexity};

pub struct ComplexityVisitor {
    file_complexity: u32,
    classes_count: usize,
    functions: Vec<FunctionComplexity>,
}

impl Default for ComplexityVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplexityVisitor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_complexity: 0,
            classes_count: 0,
            functions: Vec::new(),
        }
    }

    /// Traverses the tree once and returns the finalized metrics.
    /// A file with zero functions yields all-zero metrics, not an error.
    #[must_use]
    pub fn analyze(mut self, root: Node, source: &str) -> FileMetrics {
        self.visit(root, source);
        self.finalize()
    }

    fn visit(&mut self, node: Node, source: &str) {
        match node.kind() {
            "function_definition" => self.record_function(node, source),
            "class_definition" => self.classes_count += 1,
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, source);
        }
    }

    fn record_function(&mut self, node: Node, source: &str) {
        let name = node
            .child_by_field_name("name")
            .and_then(|n| n.utf8_text(source.as_bytes()).ok())
            .unwrap_or("<anonymous>")
            .to_string();

        let mut score = 1; // baseline path
        tally_branches(node, &mut score);

        self.file_complexity += score;
        self.functions.push(FunctionComplexity { name, score });
    }

    fn finalize(self) -> FileMetrics {
        let functions_count = self.functions.len();
        let max_function_complexity = self.functions.iter().map(|f| f.score).max().unwrap_or(0);

        #[allow(clippy::cast_precision_loss)]
        let avg_function_complexity = if functions_count == 0 {
            0.0
        } else {
            f64::from(self.file_complexity) / functions_count as f64
        };

        FileMetrics {
            file_complexity: self.file_complexity,
            functions_count,
            classes_count: self.classes_count,
            avg_function_complexity,
            max_function_complexity,
            functions: self.functions,
        }
    }
}

/// Adds one point per decision point under `node`, skipping nested
/// definitions (they get their own entries). `elif` arrives as
/// `elif_clause`, so it is listed alongside `if_statement`.
fn tally_branches(node: Node, score: &mut u32) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "function_definition" | "class_definition" => {}
            "if_statement" | "elif_clause" | "while_statement" | "for_statement"
            | "except_clause" | "boolean_operator" => {
                *score += 1;
                tally_branches(child, score);
            }
            _ => tally_branches(child, score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn metrics(code: &str) -> FileMetrics {
        let mut parser = Parser::new();
        parser
            .set_language(tree_sitter_python::language())
            .expect("failed to set language");
        let tree = parser.parse(code, None).expect("failed to parse code");
        ComplexityVisitor::new().analyze(tree.root_node(), code)
    }

    #[test]
    fn linear_function_scores_one() {
        let m = metrics("def f():\n    x = 1\n    return x\n");
        assert_eq!(m.functions.len(), 1);
        assert_eq!(m.functions[0].score, 1);
        assert_eq!(m.file_complexity, 1);
    }

    #[test]
    fn branches_and_boolean_chain() {
        // base(1) + if(1) + for(1) + or(1) = 4
        let code = "def f(a, b):\n    if a or b:\n        for i in a:\n            pass\n";
        let m = metrics(code);
        assert_eq!(m.functions[0].score, 4);
    }

    #[test]
    fn boolean_chain_counts_operands_minus_one() {
        // a and b and c = two operator nodes = +2
        let code = "def f(a, b, c):\n    return a and b and c\n";
        let m = metrics(code);
        assert_eq!(m.functions[0].score, 3);
    }

    #[test]
    fn elif_counts_as_branch() {
        let code = "def f(x):\n    if x:\n        pass\n    elif not x:\n        pass\n";
        let m = metrics(code);
        assert_eq!(m.functions[0].score, 3);
    }

    #[test]
    fn handlers_count_per_clause() {
        let code = "def f():\n    try:\n        g()\n    except ValueError:\n        pass\n    except KeyError:\n        pass\n";
        let m = metrics(code);
        assert_eq!(m.functions[0].score, 3);
    }

    #[test]
    fn nested_function_is_independent_entry() {
        let code = "def outer():\n    def inner(x):\n        if x:\n            pass\n    return inner\n";
        let m = metrics(code);
        assert_eq!(m.functions_count, 2);
        let outer = m.functions.iter().find(|f| f.name == "outer").unwrap();
        let inner = m.functions.iter().find(|f| f.name == "inner").unwrap();
        assert_eq!(outer.score, 1, "inner's branch must not leak outward");
        assert_eq!(inner.score, 2);
        assert_eq!(m.file_complexity, 3);
    }

    #[test]
    fn empty_file_yields_zeroes() {
        let m = metrics("x = 1\n");
        assert_eq!(m.functions_count, 0);
        assert_eq!(m.file_complexity, 0);
        assert_eq!(m.avg_function_complexity, 0.0);
        assert_eq!(m.max_function_complexity, 0);
    }

    #[test]
    fn classes_counted_but_not_scored() {
        let code = "class A:\n    def m(self):\n        pass\n";
        let m = metrics(code);
        assert_eq!(m.classes_count, 1);
        assert_eq!(m.functions_count, 1);
        assert_eq!(m.file_complexity, 1);
    }

    #[test]
    fn functions_count_matches_entries() {
        let code = "def a():\n    pass\n\ndef b():\n    pass\n";
        let m = metrics(code);
        assert_eq!(m.functions_count, m.functions.len());
    }

    #[test]
    fn average_and_max_require_finalize() {
        // scores 1 and 3: avg 2.0, max 3
        let code = "def a():\n    pass\n\ndef b(x):\n    if x:\n        pass\n    if not x:\n        pass\n";
        let m = metrics(code);
        assert!((m.avg_function_complexity - 2.0).abs() < f64::EPSILON);
        assert_eq!(m.max_function_complexity, 3);
    }
}
