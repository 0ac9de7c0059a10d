//! # Fundscope Math
//!
//! Statistics primitives for the Fundscope fund analytics engine.
//!
//! This crate provides:
//!
//! - **Descriptive statistics**: mean, sample variance and standard deviation
//! - **Correlation**: Pearson coefficient over paired and pairwise-complete samples
//! - **Windows**: trailing means over sparse (nullable) series
//! - **Drawdown**: cumulative growth curves and peak-to-trough decline
//!
//! ## Design Philosophy
//!
//! - **Explicit undefined values**: statistics that are undefined for the
//!   input report an error or `NaN`, never a silent zero
//! - **Allocation-light**: functions work on slices and iterators

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]

pub mod drawdown;
pub mod error;
pub mod rolling;
pub mod stats;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::drawdown::{cumulative_growth, max_drawdown};
    pub use crate::error::{MathError, MathResult};
    pub use crate::rolling::trailing_mean;
    pub use crate::stats::{
        mean, pairwise_complete, pearson, sample_std_dev, sample_variance, Summary,
    };
}

pub use error::{MathError, MathResult};
