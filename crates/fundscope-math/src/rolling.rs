//! Trailing-window statistics over sparse series.

use crate::error::{MathError, MathResult};
use std::collections::VecDeque;

/// Trailing mean over the last `window` slots of a sparse series.
///
/// Slot `i` averages the defined values among slots `i + 1 - window ..= i`
/// (fewer at the start of the series). Undefined slots are skipped rather
/// than counted as zero; a window with no defined value yields `None`.
///
/// # Errors
///
/// Returns `InvalidInput` if `window` is zero.
pub fn trailing_mean(values: &[Option<f64>], window: usize) -> MathResult<Vec<Option<f64>>> {
    if window == 0 {
        return Err(MathError::invalid_input("window must be at least 1"));
    }

    let mut slots: VecDeque<Option<f64>> = VecDeque::with_capacity(window);
    let mut sum = 0.0;
    let mut count = 0usize;
    let mut out = Vec::with_capacity(values.len());

    for value in values {
        if slots.len() == window {
            if let Some(Some(old)) = slots.pop_front() {
                sum -= old;
                count -= 1;
            }
        }
        if let Some(v) = value {
            sum += v;
            count += 1;
        }
        slots.push_back(*value);

        out.push(if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        });
    }

    Ok(out)
}
