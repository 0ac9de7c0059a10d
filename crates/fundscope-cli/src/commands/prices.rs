//! Prices command implementation.
//!
//! Tracks each holding's unit price from one snapshot to the next.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use fundscope_portfolio::price_changes;

use crate::commands::{Context, InputArgs};
use crate::loader::load_snapshots;
use crate::output::{print_header, print_output, MaybeDecimal, MaybePercent};

/// Arguments for the prices command.
#[derive(Args, Debug)]
pub struct PricesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only show this fund
    #[arg(long)]
    pub fund: Option<String>,

    /// Only show this security
    #[arg(long)]
    pub security: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct PriceRow {
    #[tabled(rename = "Fund")]
    fund_id: String,
    #[tabled(rename = "Security")]
    security_id: String,
    #[tabled(rename = "Date")]
    date: NaiveDate,
    #[tabled(rename = "Price")]
    price: Decimal,
    #[tabled(rename = "Previous")]
    previous_price: MaybeDecimal,
    #[tabled(rename = "Change")]
    change: MaybePercent,
}

/// Execute the prices command.
pub fn execute(args: PricesArgs, ctx: &Context) -> Result<()> {
    let snapshots = load_snapshots(&args.input.inputs)?;

    let rows: Vec<PriceRow> = price_changes(&snapshots)?
        .into_iter()
        .filter(|c| args.fund.as_ref().map_or(true, |f| *f == c.fund_id))
        .filter(|c| args.security.as_ref().map_or(true, |s| *s == c.security_id))
        .map(|c| PriceRow {
            fund_id: c.fund_id,
            security_id: c.security_id,
            date: c.date,
            price: c.price,
            previous_price: MaybeDecimal(c.previous_price),
            change: MaybePercent(c.change),
        })
        .collect();

    print_header("Price changes", ctx.format);
    print_output(&rows, ctx.format)
}
