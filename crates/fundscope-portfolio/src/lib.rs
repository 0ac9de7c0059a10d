//! # Fundscope Portfolio
//!
//! Aggregation and performance analytics over fund position snapshots.
//!
//! A snapshot is a [`PositionTable`]: one row per (fund, date, security)
//! holding with its market value and descriptive dimensions. This crate
//! rolls those rows up, weights them, and turns a sequence of snapshots
//! into per-fund return series and risk statistics.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations take explicit inputs and return new values
//! - **Exact money**: Market values are `Decimal`, so group totals conserve the input total
//! - **Undefined stays undefined**: Zero-total weights and degenerate correlations
//!   are `NaN`, missing returns are `None`
//! - **Config-driven parallelism**: Optional rayon support with threshold-based switching
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fundscope_portfolio::prelude::*;
//!
//! let table = PositionTable::from_records(vec![
//!     PositionRecord::new("F1", date, "AIR", dec!(100)),
//!     PositionRecord::new("F1", date, "BNP", dec!(300)),
//!     PositionRecord::new("F2", date, "AIR", dec!(200)),
//! ]);
//!
//! let by_fund = aggregate(&table, &[Column::FundId])?;
//! let weights = compute_weights(&table, &[Column::FundId])?;
//!
//! let series = build_series(&[table, next_month])?;
//! let profiles = compute_risk_profiles(&series, &AnalyticsConfig::default())?;
//! let matrix = compute_correlations(&series);
//! ```
//!
//! ## Module Overview
//!
//! - [`aggregation`] - Group totals, weights, breakdowns and top positions
//! - [`performance`] - Return series, risk profiles, correlation, price changes
//! - [`types`] - Columns, records, tables and configuration
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel processing for large fund cohorts

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregation;
pub mod error;
pub mod parallel;
pub mod performance;
pub mod types;

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};

// Re-export main types
pub use types::{
    AnalyticsConfig, Column, KeyPart, PositionRecord, PositionTable, DEFAULT_PERIODS_PER_YEAR,
    DEFAULT_RISK_FREE_RATE, DEFAULT_ROLLING_WINDOW,
};

// Re-export aggregation types and functions
pub use aggregation::{
    aggregate, aggregate_by_asset_type, aggregate_by_fund_country_asset_type, compute_weights,
    compute_weights_strict, group_breakdown, share, top_positions, weights_by_fund,
    weights_by_fund_and_asset_type, weights_by_manager_and_asset_type, GroupAggregate,
    GroupBreakdown, GroupKey, GroupRow, GroupTotal, RankedPosition, WeightedPosition,
};

// Re-export performance types and functions
pub use performance::{
    build_series, compute_correlations, compute_correlations_with_config, compute_risk_profile,
    compute_risk_profiles, pivot_returns, price_changes, risk_profile_from_returns,
    variation_statistics, CorrelationMatrix, PriceChange, ReturnMatrix, ReturnSeries,
    RiskProfile, SeriesPoint, VariationStatistics,
};

pub use parallel::maybe_parallel_map;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use fundscope_portfolio::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{PortfolioError, PortfolioResult};

    // Core types
    pub use crate::types::{AnalyticsConfig, Column, KeyPart, PositionRecord, PositionTable};

    // Aggregation
    pub use crate::aggregation::{
        aggregate, compute_weights, compute_weights_strict, group_breakdown, top_positions,
        GroupAggregate, GroupBreakdown, GroupKey, RankedPosition, WeightedPosition,
    };

    // Performance
    pub use crate::performance::{
        build_series, compute_correlations, compute_risk_profile, compute_risk_profiles,
        price_changes, variation_statistics, CorrelationMatrix, PriceChange, ReturnSeries,
        RiskProfile, VariationStatistics,
    };

    // Re-export commonly used types from dependencies
    pub use chrono::NaiveDate;
    pub use rust_decimal::Decimal;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_compiles() {
        // Basic smoke test
        let err = PortfolioError::schema("group_by must not be empty");
        assert!(err.to_string().contains("group_by"));
        assert_eq!(AnalyticsConfig::default().periods_per_year, 252);
    }
}
