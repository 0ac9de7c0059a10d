//! Series command implementation.
//!
//! Builds each fund's valuation and daily return series across snapshots.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use fundscope_portfolio::build_series;

use crate::commands::{AnalyticsOverrides, Context, InputArgs};
use crate::loader::load_snapshots;
use crate::output::{print_header, print_output, MaybePercent};

/// Arguments for the series command.
#[derive(Args, Debug)]
pub struct SeriesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only show this fund
    #[arg(long)]
    pub fund: Option<String>,

    #[command(flatten)]
    pub overrides: AnalyticsOverrides,
}

#[derive(Debug, Serialize, Tabled)]
struct SeriesRow {
    #[tabled(rename = "Fund")]
    fund_id: String,
    #[tabled(rename = "Date")]
    date: NaiveDate,
    #[tabled(rename = "Valuation")]
    valuation: Decimal,
    #[tabled(rename = "Dividends")]
    dividends: Decimal,
    #[tabled(rename = "Securities")]
    securities: usize,
    #[tabled(rename = "Daily Return")]
    daily_return: MaybePercent,
    #[tabled(rename = "Rolling Mean")]
    rolling_mean: MaybePercent,
}

/// Execute the series command.
pub fn execute(args: SeriesArgs, ctx: &Context) -> Result<()> {
    let config = args.overrides.apply(&ctx.analytics)?;
    let snapshots = load_snapshots(&args.input.inputs)?;
    let series = build_series(&snapshots)?;

    let mut rows = Vec::new();
    for (fund_id, fund_series) in &series {
        if args.fund.as_ref().is_some_and(|f| f != fund_id) {
            continue;
        }
        let rolling = fund_series.rolling_mean(config.rolling_window)?;
        for (point, mean) in fund_series.points.iter().zip(rolling) {
            rows.push(SeriesRow {
                fund_id: fund_id.clone(),
                date: point.date,
                valuation: point.valuation,
                dividends: point.dividends,
                securities: point.security_count,
                daily_return: MaybePercent(point.daily_return),
                rolling_mean: MaybePercent(mean),
            });
        }
    }

    print_header(
        &format!(
            "Valuation series ({} snapshot(s), rolling window {})",
            snapshots.len(),
            config.rolling_window
        ),
        ctx.format,
    );
    print_output(&rows, ctx.format)
}
