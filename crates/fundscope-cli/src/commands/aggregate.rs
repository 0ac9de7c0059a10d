//! Aggregate command implementation.
//!
//! Sums market value by any combination of dimension columns.

use anyhow::Result;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use fundscope_portfolio::{aggregate, share};

use crate::commands::{group_label, parse_group_by, Context, InputArgs};
use crate::loader::load_combined;
use crate::output::{print_header, print_report, Percent};

/// Arguments for the aggregate command.
#[derive(Args, Debug)]
pub struct AggregateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Comma-separated dimension columns (fund_id, date, security_id, sector,
    /// country, asset_type, manager_id)
    #[arg(short, long, default_value = "fund_id")]
    pub group_by: String,

    /// Row order
    #[arg(long, value_enum, default_value = "value")]
    pub sort: SortOrder,
}

/// Row order for grouped output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Largest market value first
    Value,
    /// By group key
    Key,
}

#[derive(Debug, Serialize, Tabled)]
struct AggregateRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Positions")]
    positions: usize,
    #[tabled(rename = "Market Value")]
    market_value: Decimal,
    #[tabled(rename = "Share")]
    share: Percent,
}

/// Execute the aggregate command.
pub fn execute(args: AggregateArgs, ctx: &Context) -> Result<()> {
    let group_by = parse_group_by(&args.group_by)?;
    let table = load_combined(&args.input.inputs)?;
    let result = aggregate(&table, &group_by)?;
    let total = result.total();

    let (sorted, structured) = match args.sort {
        SortOrder::Value => (result.sorted_by_value(), result.rows_by_value()),
        SortOrder::Key => (result.sorted_by_key(), result.rows()),
    };

    let rows: Vec<AggregateRow> = sorted
        .iter()
        .map(|(key, group)| AggregateRow {
            group: key.to_string(),
            positions: group.count,
            market_value: group.market_value,
            share: Percent(share(group.market_value, total)),
        })
        .collect();

    print_header(
        &format!("Market value by {} (total {total})", group_label(&group_by)),
        ctx.format,
    );
    print_report(&rows, &structured, ctx.format)
}
