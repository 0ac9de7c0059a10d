//! Fundscope CLI - Command-line interface for fund portfolio analytics.
//!
//! # Usage
//!
//! ```bash
//! # Market value by fund and asset type
//! fundscope aggregate -i positions.csv --group-by fund_id,asset_type
//!
//! # Weights within each fund
//! fundscope weights -i positions.csv
//!
//! # Risk profile per fund across monthly snapshots
//! fundscope risk -i 2024-01.csv -i 2024-02.csv -i 2024-03.csv --periods 12
//!
//! # Correlation matrix as JSON
//! fundscope correlate -i jan.csv -i feb.csv -i mar.csv --format json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod loader;
mod output;
mod settings;

use cli::{Cli, Commands};
use commands::Context;
use settings::{default_path, CliConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = CliConfig::load(cli.config.as_deref())?;
    let ctx = Context {
        format: cli.format,
        analytics: config.analytics,
        config_path: cli
            .config
            .or_else(|| default_path().filter(|p| p.exists())),
    };

    // Execute command
    match cli.command {
        Commands::Aggregate(args) => commands::aggregate::execute(args, &ctx)?,
        Commands::Weights(args) => commands::weights::execute(args, &ctx)?,
        Commands::Breakdown(args) => commands::breakdown::execute(args, &ctx)?,
        Commands::Top(args) => commands::top::execute(args, &ctx)?,
        Commands::Series(args) => commands::series::execute(args, &ctx)?,
        Commands::Risk(args) => commands::risk::execute(args, &ctx)?,
        Commands::Variation(args) => commands::variation::execute(args, &ctx)?,
        Commands::Correlate(args) => commands::correlate::execute(args, &ctx)?,
        Commands::Prices(args) => commands::prices::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs go to stderr so table, JSON and CSV output stay clean.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("fundscope=debug,fundscope_portfolio=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
