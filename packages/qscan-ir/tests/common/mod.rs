//! Common test utilities for qscan-ir
//!
//! Shared fixtures and helpers for the integration tests.

#![allow(dead_code)]

use qscan_ir::features::parsing::{ParsedTree, Parser, TreeSitterParser};
use qscan_ir::features::quantum_patterns::{AstPatternAnalyzer, PatternAnalyzer, PatternReport};

/// Primality test with a modulo check inside a loop
pub const IS_PRIME: &str =
    "function isPrime(n){ for(let i=2;i<n;i++){ if(n % i === 0){ return false; } } return true; }";

/// Array search through `.find`
pub const ARRAY_SEARCH: &str = "function search(arr,x){ return arr.find(v => v === x); }";

/// Naive DFT kernel
pub const QFT_KERNEL: &str = "function qft(x){ for(let i=0;i<x.length;i++){ for(let j=0;j<x.length;j++){ Math.cos(2 * Math.PI * i * j / x.length); } } }";

/// Linear scan over an array, spread over several lines
pub const LINEAR_SCAN: &str = r#"function linearSearch(items, target) {
  for (let i = 0; i < items.length; i++) {
    if (items[i] === target) {
      return i;
    }
  }
  return -1;
}"#;

/// A React component that also filters a list
pub const JSX_COMPONENT: &str = r#"import React from 'react';

export default function TodoList({ todos, query }) {
  const visible = todos.filter(t => t.title.includes(query));
  return (
    <ul className="todos">
      {visible.map(t => <li key={t.id}>{t.title}</li>)}
    </ul>
  );
}"#;

/// ES6 class with no free functions
pub const CLASS_STACK: &str =
    "class Stack { constructor() { this.items = []; } push(x) { this.items.push(x); } }";

/// Python version of the primality test
pub const PYTHON_IS_PRIME: &str =
    "def is_prime(n):\n    for i in range(2, n):\n        if n % i == 0:\n            return False\n    return True\n";

pub fn parse(source: &str) -> ParsedTree {
    TreeSitterParser::new()
        .parse(source)
        .unwrap_or_else(|e| panic!("failed to parse fixture: {e}"))
}

pub fn analyze(source: &str) -> PatternReport {
    AstPatternAnalyzer::new()
        .analyze(&parse(source))
        .unwrap_or_else(|e| panic!("analysis failed: {e}"))
}

/// Generate a JavaScript file with N small functions
pub fn fixture_n_functions(n: usize) -> String {
    (0..n)
        .map(|i| format!("function func_{i}(a) {{ return a + {i}; }}\n"))
        .collect()
}
