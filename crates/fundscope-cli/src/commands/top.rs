//! Top command implementation.
//!
//! Lists the largest positions across all inputs.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use fundscope_portfolio::top_positions;

use crate::commands::{Context, InputArgs};
use crate::loader::load_combined;
use crate::output::{print_header, print_report, Percent};

/// Arguments for the top command.
#[derive(Args, Debug)]
pub struct TopArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of positions to list
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

#[derive(Debug, Serialize, Tabled)]
struct TopRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Fund")]
    fund_id: String,
    #[tabled(rename = "Security")]
    security_id: String,
    #[tabled(rename = "Date")]
    date: NaiveDate,
    #[tabled(rename = "Market Value")]
    market_value: Decimal,
    #[tabled(rename = "Portfolio Weight")]
    portfolio_weight: Percent,
}

/// Execute the top command.
pub fn execute(args: TopArgs, ctx: &Context) -> Result<()> {
    let table = load_combined(&args.input.inputs)?;
    let top = top_positions(&table, args.limit);

    let rows: Vec<TopRow> = top
        .iter()
        .map(|t| TopRow {
            rank: t.rank,
            fund_id: t.position.fund_id.clone(),
            security_id: t.position.security_id.clone(),
            date: t.position.date,
            market_value: t.position.market_value,
            portfolio_weight: Percent(t.portfolio_weight),
        })
        .collect();

    print_header(&format!("Top {} positions", args.limit), ctx.format);
    print_report(&rows, &top, ctx.format)
}
