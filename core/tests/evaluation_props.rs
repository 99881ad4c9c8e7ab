// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for the evaluation mapper

use gomoku_core::evaluation::MIN_SHARE;
use gomoku_core::{AdvantageLabel, EvaluationMapper};
use proptest::prelude::*;

proptest! {
    #[test]
    fn probability_is_symmetric(score in -1.0e7f64..1.0e7) {
        let mapper = EvaluationMapper::default();
        let p = mapper.probability(score);
        let q = mapper.probability(-score);
        prop_assert!((q - (1.0 - p)).abs() < 1e-12);
        prop_assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn bar_widths_stay_visible(score in -1.0e9f64..1.0e9) {
        let bar = EvaluationMapper::default().bar_widths(score);
        prop_assert!(bar.white + bar.black <= 100.0 + 1e-9);
        prop_assert!(bar.white >= MIN_SHARE * 50.0 - 1e-12);
        prop_assert!(bar.black >= MIN_SHARE * 50.0 - 1e-12);
    }

    #[test]
    fn probability_is_monotonic(a in -1.0e6f64..1.0e6, b in -1.0e6f64..1.0e6) {
        let mapper = EvaluationMapper::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(mapper.probability(lo) <= mapper.probability(hi) + 1e-15);
    }

    #[test]
    fn label_grows_with_magnitude(a in 0.0f64..1.0e6, b in 0.0f64..1.0e6) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(AdvantageLabel::from_score(lo) <= AdvantageLabel::from_score(hi));
        prop_assert_eq!(AdvantageLabel::from_score(-hi), AdvantageLabel::from_score(hi));
    }
}

#[test]
fn probability_at_zero_is_exactly_half() {
    assert_eq!(EvaluationMapper::default().probability(0.0), 0.5);
    assert_eq!(EvaluationMapper::with_scale(42.0).probability(0.0), 0.5);
}

#[test]
fn label_order_across_breakpoints() {
    let labels: Vec<AdvantageLabel> = [0.0, 100.0, 1_000.0, 10_000.0, 100_000.0]
        .iter()
        .map(|s| AdvantageLabel::from_score(*s))
        .collect();
    assert!(labels.windows(2).all(|w| w[0] < w[1]));
}
