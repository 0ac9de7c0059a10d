//! Config command implementation.
//!
//! Shows the effective analytics configuration and writes default files.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_header, print_info, print_json, print_output, print_success, KeyValue};
use crate::settings::{default_path, CliConfig};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with default values
    Init(InitArgs),

    /// Show the default configuration file location
    Path,
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination file (defaults to the user config directory)
    pub path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Init(init_args) => execute_init(init_args),
        ConfigCommand::Path => execute_path(),
    }
}

/// Show the effective configuration.
fn execute_show(ctx: &Context) -> Result<()> {
    let config = CliConfig {
        analytics: ctx.analytics.clone(),
    };

    if ctx.format == OutputFormat::Json {
        return print_json(&config);
    }

    let analytics = &config.analytics;
    let results = vec![
        KeyValue::new("risk_free_annual_rate", analytics.risk_free_annual_rate),
        KeyValue::new("periods_per_year", analytics.periods_per_year),
        KeyValue::new("rolling_window", analytics.rolling_window),
        KeyValue::new("parallel", analytics.parallel),
        KeyValue::new("parallel_threshold", analytics.parallel_threshold),
    ];

    let source = ctx
        .config_path
        .as_ref()
        .map_or_else(|| "defaults".to_string(), |p| p.display().to_string());
    print_header(&format!("Configuration ({source})"), ctx.format);
    print_output(&results, ctx.format)
}

/// Write a default configuration file.
fn execute_init(args: InitArgs) -> Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?,
    };

    if path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists; use --force to overwrite",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, CliConfig::default().to_toml()?)?;

    print_success(&format!("Wrote default configuration to {}", path.display()));
    Ok(())
}

/// Show configuration file location.
fn execute_path() -> Result<()> {
    match default_path() {
        Some(path) => {
            println!("{}", path.display());
            if !path.exists() {
                print_info("File does not exist; run `fundscope config init` to create it.");
            }
        }
        None => anyhow::bail!("Could not determine config directory"),
    }
    Ok(())
}
