//! Syntax-tree pattern analyzer
//!
//! Every function declaration in the program is a scan root and its whole
//! subtree is scanned, nested functions included. Within a root, each
//! `for`/`while` loop acts as an outer loop whose subtree is searched for
//! inner loops (trigonometric calls) and `if` comparisons. A comparison k
//! loops deep is therefore reported k times.

use crate::errors::Result;
use crate::features::parsing::domain::{
    print_expression, LoopKind, MemberProperty, ParsedTree, SyntaxKind, SyntaxNode,
};
use crate::features::quantum_patterns::domain::{Finding, PatternKind, PatternReport};
use crate::features::quantum_patterns::ports::PatternAnalyzer;
use crate::shared::models::LineRef;

const FOURIER_HINTS: &[&str] = &["fourier", "fft", "dft", "qft"];
const FACTOR_HINTS: &[&str] = &["factor", "prime", "divisor", "gcd"];
const SEARCH_METHODS: &[&str] = &["find", "filter", "indexOf", "includes"];
const TRIG_METHODS: &[&str] = &["exp", "cos", "sin"];
const TWO_PI: &str = "2 * Math.PI";

/// Default pattern analyzer
#[derive(Debug, Clone, Copy, Default)]
pub struct AstPatternAnalyzer;

impl AstPatternAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl PatternAnalyzer for AstPatternAnalyzer {
    fn analyze(&self, tree: &ParsedTree) -> Result<PatternReport> {
        let mut report = PatternReport::new();

        for node in tree.root.descendants() {
            if let SyntaxKind::FunctionDecl { name, .. } = &node.kind {
                let mut scan = FunctionScan {
                    source: &tree.source,
                    function: name.as_deref().unwrap_or("anonymous"),
                    report: &mut report,
                };
                scan.run(node);
            }
        }

        tracing::debug!(
            findings = report.finding_count(),
            grover = report.grover_potential,
            shor = report.shor_potential,
            qft = report.qft_potential,
            "pattern analysis finished"
        );
        Ok(report)
    }
}

fn line_of(node: &SyntaxNode) -> LineRef {
    LineRef::of(node.span.as_ref())
}

/// Only `for` and `while` count as loops for the heuristics
fn is_scanned_loop(node: &SyntaxNode) -> bool {
    matches!(
        node.kind,
        SyntaxKind::Loop {
            kind: LoopKind::For | LoopKind::While,
            ..
        }
    )
}

fn is_modulo(node: Option<&SyntaxNode>) -> bool {
    matches!(
        node.map(|n| &n.kind),
        Some(SyntaxKind::Binary { operator, .. }) if operator.as_str() == "%"
    )
}

fn is_zero_literal(node: Option<&SyntaxNode>) -> bool {
    matches!(
        node.map(|n| &n.kind),
        Some(SyntaxKind::Number { value, .. }) if *value == 0.0
    )
}

/// Plain member access; links of an optional chain do not count
fn is_member(node: Option<&SyntaxNode>) -> bool {
    matches!(
        node.map(|n| &n.kind),
        Some(SyntaxKind::Member { chained: false, .. })
    )
}

/// `obj.name(...)` or `obj[name](...)` → `name`, plus the receiver.
///
/// Calls inside an optional chain are not method calls for the
/// heuristics, and computed keys count only when they are bare
/// identifiers.
fn called_method(call: &SyntaxNode) -> Option<(&str, Option<&SyntaxNode>)> {
    let SyntaxKind::Call {
        callee,
        chained: false,
        ..
    } = &call.kind
    else {
        return None;
    };
    let SyntaxKind::Member {
        object, property, ..
    } = &callee.as_deref()?.kind
    else {
        return None;
    };

    let name = match property {
        MemberProperty::Named(name) => name.as_str(),
        MemberProperty::Computed(key) => match &key.kind {
            SyntaxKind::Identifier(name) => name.as_str(),
            _ => return None,
        },
        MemberProperty::Missing => return None,
    };
    Some((name, object.as_deref()))
}

struct FunctionScan<'a> {
    source: &'a str,
    function: &'a str,
    report: &'a mut PatternReport,
}

impl FunctionScan<'_> {
    fn record(&mut self, kind: PatternKind, line: LineRef) {
        self.report.record(Finding::new(kind, self.function, line));
    }

    fn run(&mut self, function: &SyntaxNode) {
        let line = line_of(function);
        let lower = self.function.to_lowercase();

        if FOURIER_HINTS.iter().any(|hint| lower.contains(hint)) {
            self.record(PatternKind::FourierName, line);
        }
        if FACTOR_HINTS.iter().any(|hint| lower.contains(hint)) {
            self.record(PatternKind::FactorName, line);
        }

        for node in function.descendants().skip(1) {
            if is_scanned_loop(node) {
                self.scan_outer_loop(node);
            } else if matches!(node.kind, SyntaxKind::Call { .. }) {
                self.check_search_method(node);
            }
        }
    }

    fn scan_outer_loop(&mut self, outer: &SyntaxNode) {
        for node in outer.descendants().skip(1) {
            if is_scanned_loop(node) {
                for call in node.descendants().skip(1) {
                    self.check_trig_call(call);
                }
            } else if let SyntaxKind::If { test, .. } = &node.kind {
                self.check_comparison(test.as_deref(), outer, node);
            }
        }
    }

    /// `Math.cos(2 * Math.PI * ...)` and friends
    fn check_trig_call(&mut self, call: &SyntaxNode) {
        let SyntaxKind::Call { arguments, .. } = &call.kind else {
            return;
        };
        let Some((method, object)) = called_method(call) else {
            return;
        };
        let on_math = matches!(
            object.map(|o| &o.kind),
            Some(SyntaxKind::Identifier(name)) if name == "Math"
        );
        if !on_math || !TRIG_METHODS.contains(&method) {
            return;
        }

        let Some(first) = arguments.first() else {
            return;
        };
        if print_expression(first, self.source).contains(TWO_PI) {
            self.record(
                PatternKind::NestedTrigLoop {
                    method: method.to_string(),
                },
                line_of(call),
            );
        }
    }

    /// Shor modulo check takes precedence over the Grover member check
    fn check_comparison(&mut self, test: Option<&SyntaxNode>, outer: &SyntaxNode, if_node: &SyntaxNode) {
        let Some(SyntaxKind::Binary {
            operator,
            left,
            right,
        }) = test.map(|t| &t.kind)
        else {
            return;
        };
        if !operator.is_equality() {
            return;
        }
        let (left, right) = (left.as_deref(), right.as_deref());

        let other_side = if is_modulo(left) {
            Some(right)
        } else if is_modulo(right) {
            Some(left)
        } else {
            None
        };

        if other_side.is_some_and(is_zero_literal) {
            self.record(PatternKind::ModuloCheck, line_of(outer));
        } else if is_member(left) || is_member(right) {
            self.record(PatternKind::SearchLoopCompare, line_of(if_node));
        }
    }

    fn check_search_method(&mut self, call: &SyntaxNode) {
        if let Some((method, _)) = called_method(call) {
            if SEARCH_METHODS.contains(&method) {
                self.record(
                    PatternKind::ArraySearchMethod {
                        method: method.to_string(),
                    },
                    line_of(call),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::infrastructure::TreeSitterParser;
    use crate::features::parsing::ports::Parser;

    fn analyze(source: &str) -> PatternReport {
        let tree = TreeSitterParser::new().parse(source).unwrap();
        AstPatternAnalyzer::new().analyze(&tree).unwrap()
    }

    fn messages(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.message.as_str()).collect()
    }

    #[test]
    fn test_is_prime() {
        let report = analyze(
            "function isPrime(n){ for(let i=2;i<n;i++){ if(n % i === 0){ return false; } } return true; }",
        );
        assert!(report.shor_potential);
        assert!(!report.grover_potential);
        assert_eq!(
            messages(&report.shor_findings),
            vec![
                "Function name suggests factorization/primality testing: isPrime (line 1)",
                "Potential modulo-based factor check found in function: isPrime (around line 1)",
            ]
        );
    }

    #[test]
    fn test_array_find() {
        let report = analyze("function search(arr,x){ return arr.find(v => v === x); }");
        assert!(report.grover_potential);
        assert_eq!(
            messages(&report.grover_findings),
            vec!["Potential array search method (.find) in function: search (line 1)"]
        );
    }

    #[test]
    fn test_loop_member_comparison_reports_if_line() {
        let report = analyze(
            "function linear(arr, x) {\n  for (let i = 0; i < arr.length; i++) {\n    if (arr[i] === x) {\n      return i;\n    }\n  }\n}",
        );
        assert_eq!(
            messages(&report.grover_findings),
            vec!["Potential search loop comparing element found in function: linear (line 3)"]
        );
    }

    #[test]
    fn test_modulo_on_right_side() {
        let report = analyze("function f(n) {\n  while (n > 1) {\n    if (0 == n % 2) { n = n / 2; }\n  }\n}");
        assert_eq!(
            messages(&report.shor_findings),
            vec!["Potential modulo-based factor check found in function: f (around line 2)"]
        );
    }

    #[test]
    fn test_modulo_against_member_is_not_grover() {
        // member on the other side, but the comparison is a Shor match
        let report = analyze("function f(a, n) { for (;;) { if (a.x % n === 0) {} } }");
        assert!(report.shor_potential);
        assert!(!report.grover_potential);
    }

    #[test]
    fn test_modulo_against_nonzero_with_member_is_grover() {
        let report = analyze("function f(a, n) { for (;;) { if (a.x % n === 1) {} } }");
        assert!(!report.shor_potential);
        assert!(report.grover_potential);
    }

    #[test]
    fn test_do_while_and_for_of_are_ignored() {
        let report = analyze(
            "function f(a, x) { do { if (a[0] === x) {} } while (0); for (const v of a) { if (a[1] === x) {} } }",
        );
        assert!(!report.grover_potential);
    }

    #[test]
    fn test_if_outside_loop_is_ignored() {
        let report = analyze("function f(a, n) { if (n % 2 === 0) { return a[0] === n; } }");
        assert!(!report.quantum_speedup_potential());
    }

    #[test]
    fn test_nested_loops_report_comparison_per_outer_loop() {
        let report = analyze(
            "function f(m, x) {\n  for (let i = 0; i < 3; i++) {\n    for (let j = 0; j < 3; j++) {\n      if (m[i][j] === x) {}\n    }\n  }\n}",
        );
        assert_eq!(report.grover_findings.len(), 2);
        assert!(report.grover_findings.iter().all(|f| f.line == LineRef::Line(4)));
    }

    #[test]
    fn test_qft() {
        let report = analyze(
            "function qft(x){ for(let i=0;i<x.length;i++){ for(let j=0;j<x.length;j++){ Math.cos(2 * Math.PI * i * j / x.length); } } }",
        );
        assert!(report.qft_potential);
        assert_eq!(
            messages(&report.qft_findings),
            vec![
                "Function name suggests Fourier transform: qft (line 1)",
                "Potential QFT pattern (nested loop with Math.cos using 2*PI) in function: qft (around line 1)",
            ]
        );
    }

    #[test]
    fn test_trig_requires_two_loops_and_two_pi() {
        let single = analyze("function g(x) { for (let i = 0; i < 3; i++) { Math.sin(2 * Math.PI * i); } }");
        assert!(!single.qft_potential);

        let no_pi = analyze(
            "function g(x) { for (;;) { for (;;) { Math.sin(Math.PI * 2 * i); } } }",
        );
        assert!(!no_pi.qft_potential);

        let tight = analyze("function g(x) { for (;;) { while (x) { Math.exp(2*Math.PI*x); } } }");
        assert_eq!(tight.qft_findings.len(), 1);
    }

    #[test]
    fn test_nested_function_reported_for_both() {
        let report = analyze("function outer() {\n  function inner(a) { return a.includes(1); }\n}");
        assert_eq!(
            messages(&report.grover_findings),
            vec![
                "Potential array search method (.includes) in function: outer (line 2)",
                "Potential array search method (.includes) in function: inner (line 2)",
            ]
        );
    }

    #[test]
    fn test_computed_method_name_does_not_count() {
        let report = analyze("function f(arr) { return arr[\"find\"](x => x); }");
        assert!(!report.grover_potential);
    }

    #[test]
    fn test_identifier_key_counts_as_method_name() {
        let report = analyze("function f(arr, find) { return arr[find](x => x); }");
        assert_eq!(
            messages(&report.grover_findings),
            vec!["Potential array search method (.find) in function: f (line 1)"]
        );
    }

    #[test]
    fn test_optional_chains_are_skipped() {
        for source in [
            "function f(arr) { return arr?.find(x => x); }",
            "function f(o) { return o?.items.filter(Boolean); }",
            "function f(arr) { return arr.includes?.(1); }",
            "function f(a, x) { for (;;) { if (a?.[0] === x) {} } }",
        ] {
            assert!(!analyze(source).grover_potential, "flagged: {source}");
        }

        let broken_chain = analyze("function f(o) { return (o?.items).filter(Boolean); }");
        assert!(broken_chain.grover_potential);
    }

    #[test]
    fn test_two_pi_inside_untyped_expressions() {
        for arg in ["-(2*Math.PI*k)", "k ? 2*Math.PI*k : 0", "[2*Math.PI*k][0]"] {
            let source = format!(
                "function g(x) {{ for (;;) {{ for (;;) {{ Math.cos({}); }} }} }}",
                arg
            );
            assert!(analyze(&source).qft_potential, "missed: {arg}");
        }
    }

    #[test]
    fn test_anonymous_default_export() {
        let report = analyze("export default function () { return [1].filter(Boolean); }");
        assert_eq!(
            messages(&report.grover_findings),
            vec!["Potential array search method (.filter) in function: anonymous (line 1)"]
        );
    }

    #[test]
    fn test_top_level_code_is_not_scanned() {
        let report = analyze("const xs = [1, 2, 3];\nxs.find(x => x > 1);\n");
        assert!(!report.quantum_speedup_potential());
    }

    #[test]
    fn test_zero_in_other_notations() {
        for zero in ["0.0", "0x0", "0e5"] {
            let report = analyze(&format!("function f(n) {{ for (;;) {{ if (n % 3 === {}) {{}} }} }}", zero));
            assert!(report.shor_potential, "{} should count as zero", zero);
        }
        let bigint = analyze("function f(n) { for (;;) { if (n % 3n === 0n) {} } }");
        assert!(!bigint.shor_potential);
    }
}
