//! Market value aggregation and weighting.
//!
//! This module provides the cross-sectional analytics over one table:
//!
//! - **Aggregation**: market value roll-ups by any dimension combination
//! - **Weights**: each position's share of its group
//! - **Breakdowns**: per-group statistics and the largest positions
//!
//! All functions are pure - they take a table and return new values
//! without modifying it.
//!
//! # Example
//!
//! ```rust,ignore
//! use fundscope_portfolio::prelude::*;
//!
//! let by_country = aggregate(&table, &[Column::FundId, Column::Country])?;
//! for (key, total) in by_country.sorted_by_value() {
//!     println!("{key}: {}", total.market_value);
//! }
//!
//! let weights = compute_weights(&table, &[Column::FundId])?;
//! ```

mod breakdown;
mod group;
mod weights;

pub use breakdown::*;
pub use group::*;
pub use weights::{
    compute_weights, compute_weights_strict, share, weights_by_fund, weights_by_fund_and_asset_type,
    weights_by_manager_and_asset_type, WeightedPosition,
};
