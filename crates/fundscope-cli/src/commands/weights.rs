//! Weights command implementation.
//!
//! Computes each position's share of its group's market value.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use fundscope_portfolio::{compute_weights, compute_weights_strict};

use crate::commands::{group_label, parse_group_by, Context, InputArgs};
use crate::loader::load_combined;
use crate::output::{print_header, print_report, print_warning, Percent};

/// Arguments for the weights command.
#[derive(Args, Debug)]
pub struct WeightsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Comma-separated dimension columns defining the groups
    #[arg(short, long, default_value = "fund_id")]
    pub group_by: String,

    /// Fail on a zero-total group instead of reporting undefined weights
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct WeightRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Fund")]
    fund_id: String,
    #[tabled(rename = "Date")]
    date: NaiveDate,
    #[tabled(rename = "Security")]
    security_id: String,
    #[tabled(rename = "Market Value")]
    market_value: Decimal,
    #[tabled(rename = "Group Total")]
    group_total: Decimal,
    #[tabled(rename = "Weight")]
    weight: Percent,
}

/// Execute the weights command.
pub fn execute(args: WeightsArgs, ctx: &Context) -> Result<()> {
    let group_by = parse_group_by(&args.group_by)?;
    let table = load_combined(&args.input.inputs)?;

    let weighted = if args.strict {
        compute_weights_strict(&table, &group_by)?
    } else {
        compute_weights(&table, &group_by)?
    };

    let undefined = weighted.iter().filter(|w| !w.is_defined()).count();
    if undefined > 0 {
        print_warning(&format!(
            "{undefined} position(s) belong to zero-total groups; their weight is undefined"
        ));
    }

    let rows: Vec<WeightRow> = weighted
        .iter()
        .map(|w| WeightRow {
            group: w.group.to_string(),
            fund_id: w.position.fund_id.clone(),
            date: w.position.date,
            security_id: w.position.security_id.clone(),
            market_value: w.position.market_value,
            group_total: w.group_total,
            weight: Percent(w.weight),
        })
        .collect();

    print_header(
        &format!("Weights within {}", group_label(&group_by)),
        ctx.format,
    );
    print_report(&rows, &weighted, ctx.format)
}
