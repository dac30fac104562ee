// src/analysis/visitors/scalability.rs
//! Scalability risk heuristics: hardcoded configuration constants,
//! unbounded SQL queries, unmanaged file handles, and large bounded loops.

use tree_sitter::Node;

use crate::types::{Issue, IssueKind};

pub struct ScalabilityVisitor {
    hardcoded_configs: Vec<(usize, usize, String)>,
    resource_issues: Vec<(usize, usize)>,
    potential_bottlenecks: Vec<(usize, usize, IssueKind, String)>,
    /// Depth of enclosing `with` blocks. A counter rather than a flag so
    /// multiply-nested scoped blocks restore correctly.
    with_depth: usize,
    /// Encounter order across all buckets, so the merged sequence follows
    /// pre-order traversal rather than rule-declaration order.
    seq: usize,
    large_loop_threshold: u64,
}

impl ScalabilityVisitor {
    #[must_use]
    pub fn new(large_loop_threshold: u64) -> Self {
        Self {
            hardcoded_configs: Vec::new(),
            resource_issues: Vec::new(),
            potential_bottlenecks: Vec::new(),
            with_depth: 0,
            seq: 0,
            large_loop_threshold,
        }
    }

    fn next_seq(&mut self) -> usize {
        self.seq += 1;
        self.seq
    }

    /// Runs all four detection rules in one traversal and merges the
    /// buckets into a single encounter-ordered issue sequence.
    #[must_use]
    pub fn analyze(mut self, root: Node, source: &str) -> Vec<Issue> {
        self.visit(root, source);
        self.into_issues()
    }

    fn visit(&mut self, node: Node, source: &str) {
        if node.kind() == "with_statement" {
            self.with_depth += 1;
            self.visit_children(node, source);
            self.with_depth -= 1;
            return;
        }

        match node.kind() {
            "assignment" => self.check_assignment(node, source),
            "call" => self.check_call(node, source),
            "for_statement" => self.check_for(node, source),
            _ => {}
        }

        self.visit_children(node, source);
    }

    fn visit_children(&mut self, node: Node, source: &str) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, source);
        }
    }

    /// Rule 1: constant-case assignment of a literal outside any scoped
    /// resource block.
    fn check_assignment(&mut self, node: Node, source: &str) {
        if self.with_depth > 0 {
            return;
        }
        let Some(target) = node.child_by_field_name("left") else {
            return;
        };
        if target.kind() != "identifier" {
            return;
        }
        let Ok(name) = target.utf8_text(source.as_bytes()) else {
            return;
        };
        let Some(value) = node.child_by_field_name("right") else {
            return;
        };

        if is_constant_case(name) && is_config_literal(value.kind()) {
            let seq = self.next_seq();
            self.hardcoded_configs
                .push((seq, node.start_position().row + 1, name.to_string()));
        }
    }

    /// Rules 2 and 3: unbounded SELECT via `execute`/`executemany`, and
    /// `open` outside any scoped resource block.
    fn check_call(&mut self, node: Node, source: &str) {
        let Some(func) = node.child_by_field_name("function") else {
            return;
        };

        match func.kind() {
            "identifier" => {
                let name = func.utf8_text(source.as_bytes()).unwrap_or("");
                if name == "open" && self.with_depth == 0 {
                    let seq = self.next_seq();
                    self.resource_issues
                        .push((seq, node.start_position().row + 1));
                }
            }
            "attribute" => {
                let method = func
                    .child_by_field_name("attribute")
                    .and_then(|a| a.utf8_text(source.as_bytes()).ok())
                    .unwrap_or("");
                if (method == "execute" || method == "executemany")
                    && has_unbounded_select(node, source)
                {
                    let seq = self.next_seq();
                    self.potential_bottlenecks.push((
                        seq,
                        node.start_position().row + 1,
                        IssueKind::UnboundedQuery,
                        "SQL query without LIMIT clause".to_string(),
                    ));
                }
            }
            _ => {}
        }
    }

    /// Rule 4: `for ... in range(N)` with a single literal bound at or
    /// above the threshold.
    fn check_for(&mut self, node: Node, source: &str) {
        let Some(iter) = node.child_by_field_name("right") else {
            return;
        };
        if iter.kind() != "call" {
            return;
        }
        let callee = iter
            .child_by_field_name("function")
            .filter(|f| f.kind() == "identifier")
            .and_then(|f| f.utf8_text(source.as_bytes()).ok());
        if callee != Some("range") {
            return;
        }
        let Some(bound) = single_integer_argument(iter, source) else {
            return;
        };
        if bound >= self.large_loop_threshold {
            let seq = self.next_seq();
            self.potential_bottlenecks.push((
                seq,
                node.start_position().row + 1,
                IssueKind::LargeLoop,
                format!("Large range loop (n={bound})"),
            ));
        }
    }

    fn into_issues(self) -> Vec<Issue> {
        let mut tagged: Vec<(usize, Issue)> = Vec::new();

        for (seq, line, name) in self.hardcoded_configs {
            tagged.push((
                seq,
                Issue::new(
                    line,
                    IssueKind::HardcodedConfig,
                    format!("Hardcoded configuration value '{name}'"),
                ),
            ));
        }
        for (seq, line) in self.resource_issues {
            tagged.push((
                seq,
                Issue::new(
                    line,
                    IssueKind::ResourceLeakRisk,
                    "Resource 'file' might not be properly managed".to_string(),
                ),
            ));
        }
        for (seq, line, kind, message) in self.potential_bottlenecks {
            tagged.push((seq, Issue::new(line, kind, message)));
        }

        tagged.sort_by_key(|(seq, _)| *seq);
        tagged.into_iter().map(|(_, issue)| issue).collect()
    }
}

/// Mirrors Python's `str.isupper`: at least one cased character, none of
/// them lowercase. `MAX_RETRIES` qualifies, `_` alone does not.
fn is_constant_case(name: &str) -> bool {
    name.chars().any(char::is_uppercase) && !name.chars().any(char::is_lowercase)
}

fn is_config_literal(kind: &str) -> bool {
    matches!(
        kind,
        "string" | "concatenated_string" | "integer" | "float" | "list" | "dictionary"
    )
}

fn has_unbounded_select(call: Node, source: &str) -> bool {
    let Some(args) = call.child_by_field_name("arguments") else {
        return false;
    };
    let mut cursor = args.walk();
    let found = args.named_children(&mut cursor).any(|arg| {
        if arg.kind() != "string" {
            return false;
        }
        let text = arg.utf8_text(source.as_bytes()).unwrap_or("").to_uppercase();
        text.contains("SELECT") && !text.contains("LIMIT")
    });
    found
}

fn single_integer_argument(call: Node, source: &str) -> Option<u64> {
    let args = call.child_by_field_name("arguments")?;
    let mut cursor = args.walk();
    let named: Vec<Node> = args
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect();
    let [arg] = named.as_slice() else {
        return None;
    };
    if arg.kind() != "integer" {
        return None;
    }
    let text = arg.utf8_text(source.as_bytes()).ok()?;
    text.replace('_', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn detect(code: &str) -> Vec<Issue> {
        let mut parser = Parser::new();
        parser
            .set_language(tree_sitter_python::language())
            .expect("failed to set language");
        let tree = parser.parse(code, None).expect("failed to parse code");
        ScalabilityVisitor::new(1000).analyze(tree.root_node(), code)
    }

    fn kinds(issues: &[Issue]) -> Vec<IssueKind> {
        issues.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn flags_module_level_constant() {
        let issues = detect("MAX_RETRIES = 5\n");
        assert_eq!(kinds(&issues), vec![IssueKind::HardcodedConfig]);
        assert_eq!(issues[0].line, 1);
        assert!(issues[0].message.contains("MAX_RETRIES"));
    }

    #[test]
    fn skips_constant_inside_with_block() {
        let code = "with open('f') as f:\n    MAX_RETRIES = 5\n";
        assert!(detect(code).iter().all(|i| i.kind != IssueKind::HardcodedConfig));
    }

    #[test]
    fn skips_lowercase_and_non_literal_assignments() {
        assert!(detect("max_retries = 5\n").is_empty());
        assert!(detect("LIMIT = compute()\n").is_empty());
    }

    #[test]
    fn flags_select_without_limit() {
        let issues = detect("cursor.execute(\"SELECT * FROM t\")\n");
        assert_eq!(kinds(&issues), vec![IssueKind::UnboundedQuery]);
        assert_eq!(issues[0].message, "SQL query without LIMIT clause");
    }

    #[test]
    fn skips_select_with_limit() {
        assert!(detect("cursor.execute(\"SELECT * FROM t LIMIT 10\")\n").is_empty());
    }

    #[test]
    fn skips_non_select_statements() {
        assert!(detect("cursor.execute(\"DELETE FROM t\")\n").is_empty());
    }

    #[test]
    fn flags_bare_open() {
        let issues = detect("f = open(\"f.txt\")\n");
        assert_eq!(kinds(&issues), vec![IssueKind::ResourceLeakRisk]);
    }

    #[test]
    fn skips_open_inside_with() {
        assert!(detect("with open(\"f.txt\") as f:\n    pass\n").is_empty());
    }

    #[test]
    fn nested_with_blocks_keep_context_until_outermost_exit() {
        let code = "with a() as x:\n    with b() as y:\n        open('f')\n    open('g')\nopen('h')\n";
        let issues = detect(code);
        assert_eq!(kinds(&issues), vec![IssueKind::ResourceLeakRisk]);
        assert_eq!(issues[0].line, 5, "only the call after both exits is bare");
    }

    #[test]
    fn flags_large_range_loop() {
        let issues = detect("for i in range(5000):\n    pass\n");
        assert_eq!(kinds(&issues), vec![IssueKind::LargeLoop]);
        assert!(issues[0].message.contains("5000"));
    }

    #[test]
    fn large_loop_threshold_is_inclusive() {
        assert_eq!(detect("for i in range(1000):\n    pass\n").len(), 1);
        assert!(detect("for i in range(999):\n    pass\n").is_empty());
    }

    #[test]
    fn skips_small_and_non_literal_ranges() {
        assert!(detect("for i in range(10):\n    pass\n").is_empty());
        assert!(detect("for i in range(n):\n    pass\n").is_empty());
        assert!(detect("for i in range(0, 5000):\n    pass\n").is_empty());
    }

    #[test]
    fn issues_come_out_in_line_order() {
        let code = "A = 1\nfor i in range(2000):\n    pass\nf = open('x')\n";
        let issues = detect(code);
        let lines: Vec<usize> = issues.iter().map(|i| i.line).collect();
        assert_eq!(lines, vec![1, 2, 4]);
    }

    #[test]
    fn same_line_findings_follow_encounter_order() {
        // The loop is visited before its body, so the bound comes first.
        let code = "for i in range(2000): f = open('x')\n";
        let issues = detect(code);
        assert_eq!(
            kinds(&issues),
            vec![IssueKind::LargeLoop, IssueKind::ResourceLeakRisk]
        );
        assert_eq!(issues[0].line, issues[1].line);
    }
}
