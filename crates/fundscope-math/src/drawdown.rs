//! Cumulative growth and drawdown of a return sequence.

/// Cumulative product of `1 + r` over a return sequence.
///
/// The curve starts at the first return, not at an implicit base of 1.
pub fn cumulative_growth(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0, |acc, r| {
            *acc *= 1.0 + r;
            Some(*acc)
        })
        .collect()
}

/// Largest peak-to-trough decline of the cumulative growth curve, as a
/// fraction of the running peak.
///
/// Always `>= 0`; an empty or monotonically rising sequence yields `0`.
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;

    for level in cumulative_growth(returns) {
        peak = peak.max(level);
        if peak > 0.0 {
            worst = worst.max((peak - level) / peak);
        }
    }

    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cumulative_growth() {
        let curve = cumulative_growth(&[0.1, -0.5, 1.0]);
        assert_relative_eq!(curve[0], 1.1, epsilon = 1e-12);
        assert_relative_eq!(curve[1], 0.55, epsilon = 1e-12);
        assert_relative_eq!(curve[2], 1.1, epsilon = 1e-12);
    }

    #[test]
    fn test_peak_to_trough() {
        // Valuations 100 -> 120 -> 90 -> 130
        let returns = [0.2, -0.25, 130.0 / 90.0 - 1.0];
        assert_relative_eq!(max_drawdown(&returns), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_no_decline() {
        assert_eq!(max_drawdown(&[0.0, 0.0, 0.0]), 0.0);
        assert_eq!(max_drawdown(&[0.01, 0.02]), 0.0);
        assert_eq!(max_drawdown(&[]), 0.0);
    }

    #[test]
    fn test_deepest_of_several_declines() {
        // 1.0 -> 0.9 (10%), recover to 1.2, then 0.6 (50%)
        let returns = [0.0, -0.1, 1.2 / 0.9 - 1.0, -0.5];
        assert_relative_eq!(max_drawdown(&returns), 0.5, epsilon = 1e-12);
    }
}
