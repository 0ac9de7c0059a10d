//! Breakdown command implementation.
//!
//! Reports per-group security counts, market value, share and price range.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use fundscope_portfolio::group_breakdown;

use crate::commands::{group_label, parse_group_by, Context, InputArgs};
use crate::loader::load_combined;
use crate::output::{print_header, print_report, Percent};

/// Arguments for the breakdown command.
#[derive(Args, Debug)]
pub struct BreakdownArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Comma-separated dimension columns defining the groups
    #[arg(short, long, default_value = "fund_id")]
    pub group_by: String,
}

#[derive(Debug, Serialize, Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Securities")]
    securities: usize,
    #[tabled(rename = "Positions")]
    positions: usize,
    #[tabled(rename = "Market Value")]
    market_value: Decimal,
    #[tabled(rename = "Share")]
    share: Percent,
    #[tabled(rename = "Min Price")]
    min_price: Decimal,
    #[tabled(rename = "Max Price")]
    max_price: Decimal,
    #[tabled(rename = "Avg Price")]
    avg_price: Decimal,
}

/// Execute the breakdown command.
pub fn execute(args: BreakdownArgs, ctx: &Context) -> Result<()> {
    let group_by = parse_group_by(&args.group_by)?;
    let table = load_combined(&args.input.inputs)?;
    let breakdown = group_breakdown(&table, &group_by)?;

    let rows: Vec<BreakdownRow> = breakdown
        .iter()
        .map(|b| BreakdownRow {
            group: b.key.to_string(),
            securities: b.security_count,
            positions: b.position_count,
            market_value: b.market_value,
            share: Percent(b.share),
            min_price: b.min_price,
            max_price: b.max_price,
            avg_price: b.avg_price.round_dp(4),
        })
        .collect();

    print_header(
        &format!("Breakdown by {}", group_label(&group_by)),
        ctx.format,
    );
    print_report(&rows, &breakdown, ctx.format)
}
