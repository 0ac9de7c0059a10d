//! Variation command implementation.
//!
//! Summarizes the distribution of each fund's daily returns.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fundscope_portfolio::{build_series, variation_statistics};

use crate::commands::{Context, InputArgs};
use crate::loader::load_snapshots;
use crate::output::{print_header, print_output, print_warning, Percent};

/// Arguments for the variation command.
#[derive(Args, Debug)]
pub struct VariationArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Serialize, Tabled)]
struct VariationRow {
    #[tabled(rename = "Fund")]
    fund_id: String,
    #[tabled(rename = "Obs")]
    observations: usize,
    #[tabled(rename = "Mean")]
    mean: Percent,
    #[tabled(rename = "Std Dev")]
    std_dev: Percent,
    #[tabled(rename = "Min")]
    min: Percent,
    #[tabled(rename = "Max")]
    max: Percent,
}

/// Execute the variation command.
pub fn execute(args: VariationArgs, ctx: &Context) -> Result<()> {
    let snapshots = load_snapshots(&args.input.inputs)?;
    let series = build_series(&snapshots)?;

    let mut rows = Vec::new();
    for (fund_id, fund_series) in &series {
        match variation_statistics(fund_series) {
            Ok(stats) => rows.push(VariationRow {
                fund_id: fund_id.clone(),
                observations: stats.observations,
                mean: Percent(stats.mean),
                std_dev: Percent(stats.std_dev),
                min: Percent(stats.min),
                max: Percent(stats.max),
            }),
            Err(e) if e.is_insufficient_data() => {
                print_warning(&format!("{fund_id}: skipped, {e}"));
            }
            Err(e) => return Err(e.into()),
        }
    }

    print_header("Daily return variation", ctx.format);
    print_output(&rows, ctx.format)
}
