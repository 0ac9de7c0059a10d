//! Property-based tests for the statistics primitives.

use fundscope_math::prelude::*;
use proptest::prelude::*;

fn returns_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.5f64..0.5, 2..60)
}

proptest! {
    #[test]
    fn pearson_is_symmetric_and_bounded(x in returns_strategy(), shift in 0usize..10) {
        let y: Vec<f64> = x.iter().cycle().skip(shift).take(x.len()).map(|v| v * 0.5 + 0.01).collect();
        let xy = pearson(&x, &y).unwrap();
        let yx = pearson(&y, &x).unwrap();
        if xy.is_nan() {
            prop_assert!(yx.is_nan());
        } else {
            prop_assert!((xy - yx).abs() < 1e-12);
            prop_assert!((-1.0..=1.0).contains(&xy));
        }
    }

    #[test]
    fn unit_window_is_identity(values in prop::collection::vec(prop::option::of(-1.0f64..1.0), 0..40)) {
        let out = trailing_mean(&values, 1).unwrap();
        prop_assert_eq!(out, values);
    }

    #[test]
    fn drawdown_is_a_fraction(returns in returns_strategy()) {
        let dd = max_drawdown(&returns);
        prop_assert!(dd >= 0.0);
        prop_assert!(dd < 1.0);
    }

    #[test]
    fn summary_brackets_mean(values in returns_strategy()) {
        let s = Summary::of(&values).unwrap();
        prop_assert!(s.min <= s.mean + 1e-12);
        prop_assert!(s.mean <= s.max + 1e-12);
        prop_assert!(s.std_dev >= 0.0);
    }
}
