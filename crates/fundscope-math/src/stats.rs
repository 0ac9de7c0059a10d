//! Descriptive statistics over `f64` samples.
//!
//! Variance-based statistics use the sample (n - 1) estimator, matching the
//! convention of the reporting layer that consumes these figures.

use crate::error::{MathError, MathResult};

/// Arithmetic mean of a sample.
///
/// # Errors
///
/// Returns `InsufficientData` for an empty sample.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance (n - 1 denominator).
///
/// # Errors
///
/// Returns `InsufficientData` when fewer than two values are given.
pub fn sample_variance(values: &[f64]) -> MathResult<f64> {
    let n = values.len();
    if n < 2 {
        return Err(MathError::insufficient_data(2, n));
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Ok(sum_sq / (n - 1) as f64)
}

/// Sample standard deviation (n - 1 denominator).
///
/// # Errors
///
/// Returns `InsufficientData` when fewer than two values are given.
pub fn sample_std_dev(values: &[f64]) -> MathResult<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Pearson correlation coefficient of two aligned samples.
///
/// Returns `NaN` when either sample has zero variance: the coefficient is
/// undefined there and callers decide how to present it.
///
/// # Errors
///
/// Returns `LengthMismatch` if the samples differ in length and
/// `InsufficientData` when fewer than two pairs are available.
pub fn pearson(x: &[f64], y: &[f64]) -> MathResult<f64> {
    if x.len() != y.len() {
        return Err(MathError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    let n = x.len();
    if n < 2 {
        return Err(MathError::insufficient_data(2, n));
    }

    if is_flat(x) || is_flat(y) {
        return Ok(f64::NAN);
    }

    let mx = mean(x)?;
    let my = mean(y)?;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return Ok(f64::NAN);
    }

    // Rounding can push |r| marginally above one.
    Ok((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}

/// Relative spread below which a sample counts as constant.
const FLAT_TOLERANCE: f64 = 8.0 * f64::EPSILON;

/// True when every value equals the others up to a few ulps.
///
/// Values that are equal in exact arithmetic but went through rounding (a
/// fund compounding at a fixed rate, say) still count as constant here.
fn is_flat(values: &[f64]) -> bool {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    max - min <= FLAT_TOLERANCE * min.abs().max(max.abs())
}

/// Keeps only the positions where both sparse samples hold a value.
///
/// # Errors
///
/// Returns `LengthMismatch` if the samples are not aligned.
pub fn pairwise_complete(
    x: &[Option<f64>],
    y: &[Option<f64>],
) -> MathResult<(Vec<f64>, Vec<f64>)> {
    if x.len() != y.len() {
        return Err(MathError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    Ok(x.iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip())
}

/// Summary statistics of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation.
    pub std_dev: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl Summary {
    /// Summarizes a sample of at least two values.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` when fewer than two values are given.
    pub fn of(values: &[f64]) -> MathResult<Self> {
        let std_dev = sample_std_dev(values)?;
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        Ok(Self {
            count: values.len(),
            mean: mean(values)?,
            std_dev,
            min,
            max,
        })
    }
}
