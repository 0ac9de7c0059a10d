//! Risk command implementation.
//!
//! Computes each fund's annualized return, volatility, Sharpe and Sortino
//! ratios and maximum drawdown.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fundscope_portfolio::{build_series, compute_risk_profiles};

use crate::commands::{AnalyticsOverrides, Context, InputArgs};
use crate::loader::load_snapshots;
use crate::output::{print_header, print_output, print_warning, Percent, Ratio};

/// Arguments for the risk command.
#[derive(Args, Debug)]
pub struct RiskArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub overrides: AnalyticsOverrides,
}

#[derive(Debug, Serialize, Tabled)]
struct RiskRow {
    #[tabled(rename = "Fund")]
    fund_id: String,
    #[tabled(rename = "Obs")]
    observations: usize,
    #[tabled(rename = "Mean Daily")]
    mean_daily_return: Percent,
    #[tabled(rename = "Ann. Return")]
    annualized_return: Percent,
    #[tabled(rename = "Ann. Volatility")]
    annualized_volatility: Percent,
    #[tabled(rename = "Sharpe")]
    sharpe_ratio: Ratio,
    #[tabled(rename = "Sortino")]
    sortino_ratio: Ratio,
    #[tabled(rename = "Max Drawdown")]
    max_drawdown: Percent,
}

/// Execute the risk command.
pub fn execute(args: RiskArgs, ctx: &Context) -> Result<()> {
    let config = args.overrides.apply(&ctx.analytics)?;
    let snapshots = load_snapshots(&args.input.inputs)?;
    let series = build_series(&snapshots)?;
    let profiles = compute_risk_profiles(&series, &config)?;

    let mut rows = Vec::new();
    for (fund_id, profile) in profiles {
        match profile {
            Ok(p) => rows.push(RiskRow {
                fund_id,
                observations: p.observations,
                mean_daily_return: Percent(p.mean_daily_return),
                annualized_return: Percent(p.annualized_return),
                annualized_volatility: Percent(p.annualized_volatility),
                sharpe_ratio: Ratio(p.sharpe_ratio),
                sortino_ratio: Ratio(p.sortino_ratio),
                max_drawdown: Percent(p.max_drawdown),
            }),
            Err(e) if e.is_insufficient_data() => {
                print_warning(&format!("{fund_id}: skipped, {e}"));
            }
            Err(e) => return Err(e.into()),
        }
    }

    print_header(
        &format!(
            "Risk profile (risk-free {:.2}%, {} periods/year)",
            config.risk_free_annual_rate * 100.0,
            config.periods_per_year
        ),
        ctx.format,
    );
    print_output(&rows, ctx.format)
}
