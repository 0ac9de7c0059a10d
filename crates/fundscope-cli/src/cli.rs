//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::commands::{
    AggregateArgs, BreakdownArgs, ConfigArgs, CorrelateArgs, PricesArgs, RiskArgs, SeriesArgs,
    TopArgs, VariationArgs, WeightsArgs,
};

/// Fundscope - Fund holdings aggregation and performance analytics
#[derive(Parser)]
#[command(name = "fundscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (TOML with an [analytics] table)
    #[arg(short, long, global = true, env = "FUNDSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Total market value by any combination of dimensions
    Aggregate(AggregateArgs),

    /// Weight of each position within its group
    Weights(WeightsArgs),

    /// Per-group statistics (securities, market value, share, prices)
    Breakdown(BreakdownArgs),

    /// Largest positions by market value
    Top(TopArgs),

    /// Valuation and daily return series per fund
    Series(SeriesArgs),

    /// Risk profile per fund (Sharpe, Sortino, drawdown, ...)
    Risk(RiskArgs),

    /// Distribution of daily returns per fund
    Variation(VariationArgs),

    /// Correlation matrix of fund daily returns
    Correlate(CorrelateArgs),

    /// Price changes per holding across snapshots
    Prices(PricesArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
