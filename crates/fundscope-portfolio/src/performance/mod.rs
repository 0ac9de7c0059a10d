//! Time-series performance analytics.
//!
//! - **Series**: per-fund valuations and daily returns across snapshots
//! - **Risk**: annualized return and volatility, Sharpe, Sortino, drawdown
//! - **Correlation**: cross-fund Pearson matrix over aligned returns
//! - **Prices**: per-holding price changes
//!
//! # Example
//!
//! ```rust,ignore
//! use fundscope_portfolio::prelude::*;
//!
//! let series = build_series(&snapshots)?;
//! let profiles = compute_risk_profiles(&series, &AnalyticsConfig::default())?;
//! let matrix = compute_correlations(&series);
//! ```

mod correlation;
mod prices;
mod risk;
mod series;

pub use correlation::*;
pub use prices::*;
pub use risk::*;
pub use series::*;
