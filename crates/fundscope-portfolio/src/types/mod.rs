//! Core types: columns, position records, tables and configuration.

mod column;
mod config;
mod position;
mod table;

pub use column::Column;
pub use config::{
    AnalyticsConfig, DEFAULT_PERIODS_PER_YEAR, DEFAULT_RISK_FREE_RATE, DEFAULT_ROLLING_WINDOW,
};
pub use position::{KeyPart, PositionRecord};
pub use table::PositionTable;
