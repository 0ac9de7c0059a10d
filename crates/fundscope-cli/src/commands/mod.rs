//! CLI command implementations.

pub mod aggregate;
pub mod breakdown;
pub mod config;
pub mod correlate;
pub mod prices;
pub mod risk;
pub mod series;
pub mod top;
pub mod variation;
pub mod weights;

// Re-export submodules for convenience
pub use aggregate::AggregateArgs;
pub use breakdown::BreakdownArgs;
pub use config::ConfigArgs;
pub use correlate::CorrelateArgs;
pub use prices::PricesArgs;
pub use risk::RiskArgs;
pub use series::SeriesArgs;
pub use top::TopArgs;
pub use variation::VariationArgs;
pub use weights::WeightsArgs;

use clap::Args;
use fundscope_portfolio::{AnalyticsConfig, Column};
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Engine parameters from the configuration file.
    pub analytics: AnalyticsConfig,
    /// Configuration file in effect, if any.
    pub config_path: Option<PathBuf>,
}

/// Position files to read.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Positions CSV file; repeat for several snapshots
    #[arg(short, long = "input", value_name = "FILE", required = true)]
    pub inputs: Vec<PathBuf>,
}

/// Command-line overrides of the configured analytics parameters.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalyticsOverrides {
    /// Annual risk-free rate as a fraction (e.g. 0.02)
    #[arg(long)]
    pub risk_free: Option<f64>,

    /// Return observations per year
    #[arg(long)]
    pub periods: Option<u32>,

    /// Rolling mean window (observations)
    #[arg(long)]
    pub window: Option<usize>,
}

impl AnalyticsOverrides {
    /// Applies the overrides on top of `base` and validates the result.
    pub fn apply(&self, base: &AnalyticsConfig) -> CliResult<AnalyticsConfig> {
        let mut config = base.clone();
        if let Some(rate) = self.risk_free {
            config = config.with_risk_free_rate(rate);
        }
        if let Some(periods) = self.periods {
            config = config.with_periods_per_year(periods);
        }
        if let Some(window) = self.window {
            config = config.with_rolling_window(window);
        }
        config
            .validate()
            .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
        Ok(config)
    }
}

/// Parses a `--group-by` list such as `fund_id,asset_type`.
pub fn parse_group_by(s: &str) -> CliResult<Vec<Column>> {
    let columns = Column::parse_list(s).map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    if columns.is_empty() {
        return Err(CliError::InvalidArgument(
            "--group-by needs at least one column".to_string(),
        ));
    }
    Ok(columns)
}

/// Header text for a group-by list.
pub fn group_label(columns: &[Column]) -> String {
    columns
        .iter()
        .map(Column::name)
        .collect::<Vec<_>>()
        .join(" / ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_group_by() {
        assert_eq!(
            parse_group_by("fund_id, asset_type").unwrap(),
            vec![Column::FundId, Column::AssetType]
        );
        assert!(parse_group_by("").is_err());
        assert!(parse_group_by("fund_id,colour").is_err());
    }

    #[test]
    fn test_overrides() {
        let overrides = AnalyticsOverrides {
            risk_free: Some(0.03),
            periods: Some(12),
            window: None,
        };
        let config = overrides.apply(&AnalyticsConfig::default()).unwrap();
        assert_eq!(config.periods_per_year, 12);
        assert_eq!(config.rolling_window, 7);

        let zero = AnalyticsOverrides {
            periods: Some(0),
            ..AnalyticsOverrides::default()
        };
        assert!(zero.apply(&AnalyticsConfig::default()).is_err());
    }
}
