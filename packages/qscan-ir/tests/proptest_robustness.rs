//! Property-based robustness tests
//!
//! Arbitrary user text must never panic any stage, and every stage must be
//! deterministic.

use proptest::prelude::*;
use qscan_ir::features::cost_analysis::{
    AlgorithmTag, CostEstimator, EstimateRequest, PricingTable,
};
use qscan_ir::features::language_detection::{LanguageDetector, NgramLanguageDetector};
use qscan_ir::features::parsing::{Parser, TreeSitterParser};
use qscan_ir::features::quantum_patterns::{AstPatternAnalyzer, PatternAnalyzer};
use qscan_ir::features::syntax_validation::{SyntaxValidator, TreeSitterValidator};
use std::sync::Arc;

// Strategy for generating JavaScript identifiers (prefixed, so never a keyword)
fn js_identifier() -> impl Strategy<Value = String> {
    "v_[a-zA-Z0-9_]{0,10}"
}

// Strategy for generating loop-heavy functions
fn js_function() -> impl Strategy<Value = String> {
    (js_identifier(), js_identifier(), 0..3usize, any::<bool>()).prop_map(
        |(name, arr, depth, modulo)| {
            let test = if modulo {
                format!("{arr}.length % 2 === 0")
            } else {
                format!("{arr}[0] === 1")
            };
            let mut body = format!("if ({test}) {{ return 1; }}");
            for i in 0..depth {
                body = format!("for (let i{i} = 0; i{i} < 3; i{i}++) {{ {body} }}");
            }
            format!("function {name}({arr}) {{ {body} }}")
        },
    )
}

fn js_source() -> impl Strategy<Value = String> {
    prop::collection::vec(js_function(), 0..6).prop_map(|fns| fns.join("\n"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_pipeline_never_panics(source in "\\PC{0,400}") {
        let _ = TreeSitterValidator::new().validate(&source);
        if let Ok(tree) = TreeSitterParser::new().parse(&source) {
            prop_assert!(AstPatternAnalyzer::new().analyze(&tree).is_ok());
        }
    }

    #[test]
    fn prop_precheck_agrees_with_parser(source in "[(){}\\[\\]=+;,.a-z0-9 \n]{0,120}") {
        let accepted = TreeSitterValidator::new().validate(&source).is_ok();
        if let Ok(tree) = TreeSitterParser::new().parse(&source) {
            prop_assert_eq!(accepted, !tree.has_errors);
        } else {
            prop_assert!(!accepted);
        }
    }

    #[test]
    fn prop_generated_code_is_valid_and_analyzable(source in js_source()) {
        prop_assert!(TreeSitterValidator::new().validate(&source).is_ok());
        let tree = TreeSitterParser::new().parse(&source).unwrap();
        prop_assert!(!tree.has_errors);
        prop_assert!(AstPatternAnalyzer::new().analyze(&tree).is_ok());
    }

    #[test]
    fn prop_analysis_deterministic(source in js_source()) {
        let parser = TreeSitterParser::new();
        let analyzer = AstPatternAnalyzer::new();
        let first = analyzer.analyze(&parser.parse(&source).unwrap()).unwrap();
        let second = analyzer.analyze(&parser.parse(&source).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_detection_deterministic(text in "\\PC{0,300}") {
        let detector = NgramLanguageDetector::bundled(10_000);
        prop_assert_eq!(detector.detect(&text), detector.detect(&text));
    }

    #[test]
    fn prop_validation_deterministic(text in "[(){}\\[\\]'\"`/a-z ;\n]{0,80}") {
        let validator = TreeSitterValidator::new();
        prop_assert_eq!(validator.validate(&text), validator.validate(&text));
    }

    #[test]
    fn prop_estimates_finite_for_positive_sizes(n in 1.0f64..1e12, which in 0..3usize) {
        let tag = [AlgorithmTag::Grover, AlgorithmTag::Shor, AlgorithmTag::Qft][which].clone();
        let estimator = CostEstimator::new(Arc::new(PricingTable::bundled().unwrap()));
        let estimate = estimator
            .estimate(&EstimateRequest::single(tag, n, "IonQ Aria"))
            .unwrap();
        prop_assert!(estimate.speedup_factor.is_finite());
        prop_assert!(estimate.estimated_quantum_cost.is_finite());
        prop_assert!(estimate.classical_iterations >= 1.0);
        prop_assert!(estimate.quantum_iterations >= 1.0);
    }
}
