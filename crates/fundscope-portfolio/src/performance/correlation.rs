//! Cross-fund correlation of daily returns.

use super::series::ReturnSeries;
use crate::parallel::maybe_parallel_map;
use crate::types::AnalyticsConfig;
use chrono::NaiveDate;
use fundscope_math::stats::{pairwise_complete, pearson};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Daily returns of several funds aligned on the union of their dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnMatrix {
    /// Row dates, ascending.
    pub dates: Vec<NaiveDate>,

    /// Column fund identifiers, ascending.
    pub funds: Vec<String>,

    /// `cells[row][col]`: the fund's return on that date, if defined.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl ReturnMatrix {
    /// Returns one fund's column.
    #[must_use]
    pub fn column(&self, index: usize) -> Vec<Option<f64>> {
        self.cells
            .iter()
            .map(|row| row.get(index).copied().flatten())
            .collect()
    }
}

/// Pivots fund series into a date x fund matrix of returns.
///
/// A fund without an observation on a date, or whose return there is
/// undefined, gets `None` in that cell.
#[must_use]
pub fn pivot_returns(series: &BTreeMap<String, ReturnSeries>) -> ReturnMatrix {
    let dates: Vec<NaiveDate> = series
        .values()
        .flat_map(|s| s.points.iter().map(|p| p.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let row_of: BTreeMap<NaiveDate, usize> =
        dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();

    let funds: Vec<String> = series.keys().cloned().collect();
    let mut cells = vec![vec![None; funds.len()]; dates.len()];
    for (col, s) in series.values().enumerate() {
        for point in &s.points {
            if let Some(&row) = row_of.get(&point.date) {
                cells[row][col] = point.daily_return;
            }
        }
    }

    ReturnMatrix {
        dates,
        funds,
        cells,
    }
}

/// Symmetric fund x fund Pearson correlation matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Fund identifiers, ascending; row and column order of `values`.
    pub funds: Vec<String>,

    /// Correlation coefficients. `NaN` where undefined; diagonal is 1.
    pub values: Vec<Vec<f64>>,

    /// Number of dates on which both funds had a defined return.
    pub observations: Vec<Vec<usize>>,
}

impl CorrelationMatrix {
    /// Number of funds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.funds.len()
    }

    /// Returns true if the matrix has no funds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
    }

    /// Correlation between two funds by identifier.
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.values[i][j])
    }

    fn index_of(&self, fund: &str) -> Option<usize> {
        self.funds.binary_search_by(|f| f.as_str().cmp(fund)).ok()
    }
}

/// Correlates every pair of funds sequentially.
///
/// See [`compute_correlations_with_config`].
#[must_use]
pub fn compute_correlations(series: &BTreeMap<String, ReturnSeries>) -> CorrelationMatrix {
    compute_correlations_with_config(series, &AnalyticsConfig::sequential())
}

/// Correlates every pair of funds over the dates where both have a
/// defined return.
///
/// Pairs with fewer than two such dates, or with a constant return on
/// either side, are `NaN`. Pairs are evaluated in parallel when enabled and
/// the pair count reaches the threshold.
#[must_use]
pub fn compute_correlations_with_config(
    series: &BTreeMap<String, ReturnSeries>,
    config: &AnalyticsConfig,
) -> CorrelationMatrix {
    let matrix = pivot_returns(series);
    let n = matrix.funds.len();
    let columns: Vec<Vec<Option<f64>>> = (0..n).map(|i| matrix.column(i)).collect();

    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    let results = maybe_parallel_map(&pairs, config, |&(i, j)| {
        correlate(&columns[i], &columns[j])
    });

    let mut values = vec![vec![f64::NAN; n]; n];
    let mut observations = vec![vec![0; n]; n];
    for (i, column) in columns.iter().enumerate() {
        values[i][i] = 1.0;
        observations[i][i] = column.iter().flatten().count();
    }

    for (&(i, j), &(value, count)) in pairs.iter().zip(&results) {
        if value.is_nan() {
            warn!(
                a = %matrix.funds[i],
                b = %matrix.funds[j],
                paired = count,
                "correlation undefined"
            );
        }
        values[i][j] = value;
        values[j][i] = value;
        observations[i][j] = count;
        observations[j][i] = count;
    }

    debug!(funds = n, dates = matrix.dates.len(), "computed correlation matrix");

    CorrelationMatrix {
        funds: matrix.funds,
        values,
        observations,
    }
}

fn correlate(a: &[Option<f64>], b: &[Option<f64>]) -> (f64, usize) {
    match pairwise_complete(a, b) {
        Ok((x, y)) => {
            let count = x.len();
            (pearson(&x, &y).unwrap_or(f64::NAN), count)
        }
        Err(_) => (f64::NAN, 0),
    }
}
