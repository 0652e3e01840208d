use pointfold::{OptimizerSettings, canonicalize_expr, canonicalize_predicate};
use proptest::prelude::*;

use crate::test_helpers::common::{eval, in_lists_are_uniform, schema};
use crate::test_helpers::strategies::{arb_predicate, arb_rows};

fn settings(min_cluster_size: usize) -> OptimizerSettings {
    OptimizerSettings::default().with_min_cluster_size(min_cluster_size)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_filter_keeps_the_same_rows(
        expr in arb_predicate(),
        rows in arb_rows(),
        min_cluster_size in 1usize..4,
    ) {
        let out = canonicalize_predicate(expr.clone(), &schema(), &settings(min_cluster_size)).unwrap();
        for row in &rows {
            prop_assert_eq!(
                eval(&expr, row) == Some(true),
                eval(&out, row) == Some(true),
                "{} => {} on {:?}", expr, out, row
            );
        }
    }

    #[test]
    fn prop_value_is_exact_under_three_valued_logic(
        expr in arb_predicate(),
        rows in arb_rows(),
        min_cluster_size in 1usize..4,
    ) {
        let out = canonicalize_expr(expr.clone(), &schema(), &settings(min_cluster_size)).unwrap();
        for row in &rows {
            prop_assert_eq!(eval(&expr, row), eval(&out, row), "{} => {} on {:?}", expr, out, row);
        }
    }

    #[test]
    fn prop_rewrite_is_idempotent(expr in arb_predicate(), min_cluster_size in 1usize..4) {
        let settings = settings(min_cluster_size);
        let once = canonicalize_predicate(expr.clone(), &schema(), &settings).unwrap();
        let twice = canonicalize_predicate(once.clone(), &schema(), &settings).unwrap();
        prop_assert_eq!(&once, &twice, "not a fixed point for {}", expr);

        let once = canonicalize_expr(expr, &schema(), &settings).unwrap();
        let twice = canonicalize_expr(once.clone(), &schema(), &settings).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_rewrite_is_deterministic(expr in arb_predicate()) {
        let settings = OptimizerSettings::default();
        let a = canonicalize_predicate(expr.clone(), &schema(), &settings).unwrap();
        let b = canonicalize_predicate(expr, &schema(), &settings).unwrap();
        prop_assert_eq!(a.to_string(), b.to_string());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_literal_types_are_never_mixed(expr in arb_predicate(), min_cluster_size in 1usize..4) {
        let out = canonicalize_predicate(expr, &schema(), &settings(min_cluster_size)).unwrap();
        prop_assert!(in_lists_are_uniform(&out), "mixed IN list in {}", out);
    }
}
