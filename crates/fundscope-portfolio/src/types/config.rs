//! Configuration for fund analytics computation.

use crate::error::{PortfolioError, PortfolioResult};
use serde::{Deserialize, Serialize};

/// Default annual risk-free rate (2%).
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// Default number of return observations per year (trading days).
pub const DEFAULT_PERIODS_PER_YEAR: u32 = 252;

/// Default trailing window for rolling return means.
pub const DEFAULT_ROLLING_WINDOW: usize = 7;

/// Configuration for fund analytics computation.
///
/// Controls the risk parameters and parallelism. Every engine function takes
/// its parameters explicitly; this struct only bundles them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Annual risk-free rate used by Sharpe and Sortino ratios.
    pub risk_free_annual_rate: f64,

    /// Return observations per year used for annualization.
    pub periods_per_year: u32,

    /// Number of observations in the trailing rolling mean.
    pub rolling_window: usize,

    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum item count (funds or fund pairs) to trigger parallel processing.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            risk_free_annual_rate: DEFAULT_RISK_FREE_RATE,
            periods_per_year: DEFAULT_PERIODS_PER_YEAR,
            rolling_window: DEFAULT_ROLLING_WINDOW,
            parallel: true,
            parallel_threshold: 64,
        }
    }
}

impl AnalyticsConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the annual risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_annual_rate = rate;
        self
    }

    /// Sets the number of periods per year.
    #[must_use]
    pub fn with_periods_per_year(mut self, periods: u32) -> Self {
        self.periods_per_year = periods;
        self
    }

    /// Sets the rolling window length.
    #[must_use]
    pub fn with_rolling_window(mut self, window: usize) -> Self {
        self.rolling_window = window;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Checks the risk parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-finite rate, zero periods per year or
    /// a zero rolling window.
    pub fn validate(&self) -> PortfolioResult<()> {
        if !self.risk_free_annual_rate.is_finite() {
            return Err(PortfolioError::invalid_input(format!(
                "risk_free_annual_rate must be finite, got {}",
                self.risk_free_annual_rate
            )));
        }
        if self.periods_per_year == 0 {
            return Err(PortfolioError::invalid_input(
                "periods_per_year must be at least 1",
            ));
        }
        if self.rolling_window == 0 {
            return Err(PortfolioError::invalid_input(
                "rolling_window must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.risk_free_annual_rate, 0.02);
        assert_eq!(config.periods_per_year, 252);
        assert_eq!(config.rolling_window, 7);
        assert!(config.parallel);
        assert_eq!(config.parallel_threshold, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sequential() {
        let config = AnalyticsConfig::sequential();
        assert!(!config.parallel);
        assert!(!config.should_parallelize(10_000));
    }

    #[test]
    fn test_builder_pattern() {
        let config = AnalyticsConfig::new()
            .with_risk_free_rate(0.035)
            .with_periods_per_year(52)
            .with_rolling_window(4)
            .with_parallel(false)
            .with_threshold(8);

        assert_eq!(config.risk_free_annual_rate, 0.035);
        assert_eq!(config.periods_per_year, 52);
        assert_eq!(config.rolling_window, 4);
        assert!(!config.parallel);
        assert_eq!(config.parallel_threshold, 8);
    }

    #[test]
    fn test_should_parallelize() {
        let config = AnalyticsConfig::new().with_threshold(100);

        // Without the 'parallel' feature, this always returns false
        #[cfg(feature = "parallel")]
        {
            assert!(!config.should_parallelize(50));
            assert!(config.should_parallelize(100));
        }

        #[cfg(not(feature = "parallel"))]
        {
            assert!(!config.should_parallelize(50));
            assert!(!config.should_parallelize(100));
        }
    }

    #[test]
    fn test_validate() {
        assert!(AnalyticsConfig::new()
            .with_periods_per_year(0)
            .validate()
            .is_err());
        assert!(AnalyticsConfig::new()
            .with_rolling_window(0)
            .validate()
            .is_err());
        assert!(AnalyticsConfig::new()
            .with_risk_free_rate(f64::NAN)
            .validate()
            .is_err());
        // Negative rates are legitimate
        assert!(AnalyticsConfig::new()
            .with_risk_free_rate(-0.005)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_serde() {
        let config = AnalyticsConfig::new().with_threshold(75).with_rolling_window(5);

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AnalyticsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        // Missing fields fall back to defaults
        let parsed: AnalyticsConfig =
            serde_json::from_str(r#"{"risk_free_annual_rate": 0.01}"#).unwrap();
        assert_eq!(parsed.risk_free_annual_rate, 0.01);
        assert_eq!(parsed.periods_per_year, 252);
    }
}
