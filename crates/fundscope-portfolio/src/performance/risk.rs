//! Risk and return statistics of fund return series.
//!
//! Provides per-fund risk metrics including:
//! - Annualized return and volatility
//! - Sharpe and Sortino ratios
//! - Maximum drawdown
//!
//! Statistics use the defined daily returns of a series only. Every
//! volatility-based statistic needs at least two of them.

use super::series::ReturnSeries;
use crate::error::{PortfolioError, PortfolioResult};
use crate::parallel::maybe_parallel_map;
use crate::types::AnalyticsConfig;
use fundscope_math::drawdown::max_drawdown;
use fundscope_math::stats::{mean, sample_std_dev, Summary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Volatility at or below this is treated as zero.
const ZERO_VOLATILITY: f64 = 1e-12;

/// Minimum defined returns for volatility-based statistics.
const MIN_OBSERVATIONS: usize = 2;

/// Risk metrics of one fund.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    /// Number of defined daily returns used.
    pub observations: usize,

    /// Mean daily return.
    pub mean_daily_return: f64,

    /// `(1 + mean)^periods_per_year - 1`.
    pub annualized_return: f64,

    /// Sample standard deviation scaled by `sqrt(periods_per_year)`.
    pub annualized_volatility: f64,

    /// Annualized excess return per unit of volatility (0 when volatility is zero).
    pub sharpe_ratio: f64,

    /// Annualized excess return per unit of downside volatility
    /// (0 when fewer than two returns are negative or their dispersion is zero).
    pub sortino_ratio: f64,

    /// Largest peak-to-trough decline of cumulative growth, as a positive fraction.
    pub max_drawdown: f64,
}

/// Computes the risk profile of a fund.
///
/// ## Formula
///
/// ```text
/// daily_rf   = rf / ppy
/// sharpe     = sqrt(ppy) * (mean - daily_rf) / stdev
/// sortino    = sqrt(ppy) * (mean - daily_rf) / stdev(r where r < 0)
/// drawdown_t = (max_{s<=t} G_s - G_t) / max_{s<=t} G_s,  G_t = prod(1 + r)
/// ```
///
/// # Errors
///
/// * `InsufficientData` if the series has fewer than two defined returns
/// * `InvalidInput` if `periods_per_year` is zero or the rate is not finite
pub fn compute_risk_profile(
    series: &ReturnSeries,
    risk_free_annual_rate: f64,
    periods_per_year: u32,
) -> PortfolioResult<RiskProfile> {
    risk_profile_from_returns(
        &series.defined_returns(),
        risk_free_annual_rate,
        periods_per_year,
    )
}

/// Computes a risk profile from a plain slice of returns.
///
/// # Errors
///
/// Same as [`compute_risk_profile`].
pub fn risk_profile_from_returns(
    returns: &[f64],
    risk_free_annual_rate: f64,
    periods_per_year: u32,
) -> PortfolioResult<RiskProfile> {
    if periods_per_year == 0 {
        return Err(PortfolioError::invalid_input(
            "periods_per_year must be at least 1",
        ));
    }
    if !risk_free_annual_rate.is_finite() {
        return Err(PortfolioError::invalid_input(
            "risk-free rate must be a finite number",
        ));
    }
    if returns.len() < MIN_OBSERVATIONS {
        return Err(PortfolioError::InsufficientData {
            required: MIN_OBSERVATIONS,
            actual: returns.len(),
        });
    }

    let ppy = f64::from(periods_per_year);
    let scale = ppy.sqrt();
    let daily_rf = risk_free_annual_rate / ppy;

    let mean_return = mean(returns)?;
    let stdev = sample_std_dev(returns)?;
    let excess = mean_return - daily_rf;

    let sharpe_ratio = if stdev <= ZERO_VOLATILITY {
        0.0
    } else {
        scale * excess / stdev
    };

    let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
    let sortino_ratio = match sample_std_dev(&downside) {
        Ok(down) if down > ZERO_VOLATILITY => scale * excess / down,
        _ => 0.0,
    };

    Ok(RiskProfile {
        observations: returns.len(),
        mean_daily_return: mean_return,
        annualized_return: (1.0 + mean_return).powf(ppy) - 1.0,
        annualized_volatility: stdev * scale,
        sharpe_ratio,
        sortino_ratio,
        max_drawdown: max_drawdown(returns),
    })
}

/// Computes the risk profile of every fund.
///
/// Uses the rate and annualization from `config`, and parallel iteration
/// over funds when enabled and the fund count reaches the threshold. A fund
/// without enough data gets its own error; the others are unaffected.
///
/// # Errors
///
/// Returns `InvalidInput` if the configuration does not validate.
pub fn compute_risk_profiles(
    series: &BTreeMap<String, ReturnSeries>,
    config: &AnalyticsConfig,
) -> PortfolioResult<BTreeMap<String, PortfolioResult<RiskProfile>>> {
    config.validate()?;

    let funds: Vec<(&String, &ReturnSeries)> = series.iter().collect();
    let profiles = maybe_parallel_map(&funds, config, |(_, s)| {
        compute_risk_profile(s, config.risk_free_annual_rate, config.periods_per_year)
    });

    debug!(
        funds = funds.len(),
        failed = profiles.iter().filter(|p| p.is_err()).count(),
        "computed risk profiles"
    );

    Ok(funds
        .into_iter()
        .map(|(id, _)| id.clone())
        .zip(profiles)
        .collect())
}

/// Distribution of a fund's daily returns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariationStatistics {
    /// Number of defined returns.
    pub observations: usize,
    /// Mean daily return.
    pub mean: f64,
    /// Sample standard deviation.
    pub std_dev: f64,
    /// Lowest daily return.
    pub min: f64,
    /// Highest daily return.
    pub max: f64,
}

/// Summarizes the defined daily returns of a series.
///
/// # Errors
///
/// Returns `InsufficientData` if fewer than two returns are defined.
pub fn variation_statistics(series: &ReturnSeries) -> PortfolioResult<VariationStatistics> {
    let summary = Summary::of(&series.defined_returns())?;
    Ok(VariationStatistics {
        observations: summary.count,
        mean: summary.mean,
        std_dev: summary.std_dev,
        min: summary.min,
        max: summary.max,
    })
}
