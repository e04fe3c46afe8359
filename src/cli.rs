// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - calc <amount>: compute every metric once and print it (headless)
// - config --show/--path/--reset: manage the config file
// The --data and --demo flags override the configured data source.

use crate::config::{Config, VERSION};
use crate::store::DataStore;
use crate::{format, metrics, sanitize};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// MoneyLens - convert an amount into illustrative equivalents
#[derive(Parser)]
#[command(name = "moneylens")]
#[command(version = VERSION)]
#[command(about = "Convert a monetary amount into illustrative equivalents", long_about = None)]
pub struct Cli {
    /// Path of the reference-data JSON document
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Run against built-in sample data instead of a data file
    #[arg(long, global = true)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute every metric for an amount and print the results
    Calc {
        /// The amount (free text; non-digits are stripped)
        amount: String,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Handle the `config` subcommand. Returns true if handled (exit after).
pub fn handle_config(cli: &Cli) -> bool {
    let Some(Commands::Config { show, path, reset }) = &cli.command else {
        return false;
    };

    if *path {
        match Config::config_path() {
            Some(p) => println!("{}", p.display()),
            None => eprintln!("Could not determine config path"),
        }
    } else if *show {
        print!("{}", Config::from_env().to_toml());
    } else if *reset {
        match Config::default().save() {
            Ok(()) => {
                if let Some(p) = Config::config_path() {
                    println!("Config reset: {}", p.display());
                }
            }
            Err(e) => eprintln!("Failed to reset config: {}", e),
        }
    } else {
        // No flag provided, show help
        println!("Usage: moneylens config [--show|--path|--reset]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --path    Show config file path");
        println!("  --reset   Reset config file to defaults");
    }

    true
}

/// One-shot headless computation: load the data, compute, print.
///
/// Unlike the TUI (which keeps running on an empty store), a missing or
/// malformed data document is a hard error here - there is nothing else
/// for the command to do.
pub async fn run_calc(amount: &str, config: &Config) -> Result<()> {
    let store = if config.demo_mode {
        DataStore::sample()
    } else {
        DataStore::load(&config.data_path).await?
    };

    let canonical = sanitize::canonical(amount);
    let value = sanitize::amount(&canonical);

    println!("Amount: {}", sanitize::echo(&canonical));
    println!();
    for update in metrics::compute_all(value, &store) {
        let metric = update.metric;
        let decimals = metric.decimals();
        println!(
            "  {:<22} {:>16} {}",
            metric.label(),
            format::format_number(update.value, decimals, decimals),
            metric.unit()
        );
    }

    Ok(())
}
