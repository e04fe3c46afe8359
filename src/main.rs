// MoneyLens - terminal money-equivalence visualizer
//
// The user types an amount; after a quiet period the metrics engine
// recomputes a set of illustrative equivalents (gold, coins, diamond,
// household ratios, cost of living, cups of coffee) and the display
// animates toward the new values.
//
// Architecture:
// - Store: one-shot JSON load at startup hydrates the reference panel
// - Sanitizer: keystroke -> canonical digit string, echoed with separators
// - Debouncer: coalesces keystroke bursts into one recomputation
// - Metrics engine: independent pure conversion formulas
// - Animator: per-key linear interpolation driven by the render tick
// - TUI (ratatui): input field, metric panels, logs, status bar

mod animate;
mod cli;
mod config;
mod debounce;
mod format;
mod logging;
mod metrics;
mod sanitize;
mod store;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use logging::{LogBuffer, TuiLogLayer};
use store::DataStore;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle the config subcommand first; it prints and exits
    if cli::handle_config(&cli) {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Load configuration, then apply CLI overrides
    let mut config = Config::from_env();
    if let Some(data) = &cli.data {
        config.data_path = data.clone();
    }
    if cli.demo {
        config.demo_mode = true;
    }

    // Headless one-shot mode: plain stdout logging, no TUI
    if let Some(Commands::Calc { amount }) = &cli.command {
        init_plain_logging(&config);
        return cli::run_calc(amount, &config).await;
    }

    // TUI mode: capture logs to an in-memory buffer so they don't garble
    // the alternate screen; optionally mirror them to rotating files.
    // The guard must stay alive for the program's lifetime so file logs flush.
    let log_buffer = LogBuffer::new();
    let _file_guard = init_tui_logging(&config, log_buffer.clone());

    tracing::debug!("Configuration: {:?}", config);

    // Hydration channel: the loader task sends the store exactly once.
    // On failure it logs and sends nothing - the store stays empty and
    // the metrics degrade to non-finite values instead of blocking input.
    let (store_tx, store_rx) = mpsc::channel(1);
    let data_path = config.data_path.clone();
    let demo_mode = config.demo_mode;
    tokio::spawn(async move {
        let store = if demo_mode {
            tracing::info!("Demo mode: using built-in sample data");
            DataStore::sample()
        } else {
            match DataStore::load(&data_path).await {
                Ok(store) => store,
                Err(e) => {
                    tracing::error!("Error loading reference data: {:#}", e);
                    return;
                }
            }
        };
        let _ = store_tx.send(store).await;
    });

    // Run the TUI in the main task; blocks until the user quits
    tui::run_tui(store_rx, log_buffer, config).await
}

/// Plain stdout logging for headless mode
fn init_plain_logging(config: &Config) {
    tracing_subscriber::registry()
        .with(default_filter(config))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// TUI logging: buffer layer, plus an optional rotating JSON file layer
fn init_tui_logging(
    config: &Config,
    log_buffer: LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = default_filter(config);

    if config.logging.file_enabled {
        if let Err(e) = std::fs::create_dir_all(&config.logging.file_dir) {
            // Fall back to buffer-only logging below
            eprintln!(
                "Warning: Could not create log directory {:?}: {}",
                config.logging.file_dir, e
            );
        } else {
            let file_appender = tracing_appender::rolling::daily(
                &config.logging.file_dir,
                &config.logging.file_prefix,
            );
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(TuiLogLayer::new(log_buffer))
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .init();

            return Some(guard);
        }
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(TuiLogLayer::new(log_buffer))
        .init();
    None
}

/// Precedence: RUST_LOG env var > config file > default "info"
fn default_filter(config: &Config) -> EnvFilter {
    let default_filter = format!("moneylens={}", config.logging.level);
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into())
}
