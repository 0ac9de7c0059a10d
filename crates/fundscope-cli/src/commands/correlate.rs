//! Correlate command implementation.
//!
//! Computes the Pearson correlation matrix of fund daily returns.

use anyhow::Result;
use clap::Args;

use fundscope_portfolio::{build_series, compute_correlations_with_config};

use crate::cli::OutputFormat;
use crate::commands::{Context, InputArgs};
use crate::loader::load_snapshots;
use crate::output::{format_ratio, print_grid, print_header, print_json, print_warning};

/// Arguments for the correlate command.
#[derive(Args, Debug)]
pub struct CorrelateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Also show the number of paired observations behind each coefficient
    #[arg(long)]
    pub observations: bool,
}

/// Execute the correlate command.
pub fn execute(args: CorrelateArgs, ctx: &Context) -> Result<()> {
    let snapshots = load_snapshots(&args.input.inputs)?;
    let series = build_series(&snapshots)?;
    let matrix = compute_correlations_with_config(&series, &ctx.analytics);

    if ctx.format == OutputFormat::Json {
        return print_json(&matrix);
    }

    let undefined = matrix
        .values
        .iter()
        .flatten()
        .filter(|v| v.is_nan())
        .count()
        / 2;
    if undefined > 0 {
        print_warning(&format!(
            "{undefined} fund pair(s) have too few common observations or constant returns"
        ));
    }

    let mut header = vec!["fund".to_string()];
    header.extend(matrix.funds.iter().cloned());

    let rows: Vec<Vec<String>> = matrix
        .funds
        .iter()
        .enumerate()
        .map(|(i, fund)| {
            let mut row = vec![fund.clone()];
            row.extend(matrix.values[i].iter().zip(&matrix.observations[i]).map(
                |(value, count)| {
                    if args.observations {
                        format!("{} ({count})", format_ratio(*value))
                    } else {
                        format_ratio(*value)
                    }
                },
            ));
            row
        })
        .collect();

    print_header("Correlation of daily returns", ctx.format);
    print_grid(&header, &rows, ctx.format)
}
