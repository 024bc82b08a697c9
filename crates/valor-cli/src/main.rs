//! Valor CLI - Command-line interface for instrument valuation.
//!
//! # Usage
//!
//! ```bash
//! # Price an option
//! valor price --kind option --spot 100 --strike 95 --volatility 0.2 --expiry 0.25 \
//!     --rate 0.05 --fixed-rate 0.03 --floating-rate 0.02 --notional 1000000
//!
//! # Price every kind with the built-in formulas only
//! valor price --kind all --dispatch builtin ...
//!
//! # List supported instrument kinds
//! valor kinds
//!
//! # Show the effective engine configuration
//! valor config --config engine.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = cli.format;

    match cli.command {
        Commands::Price(args) => commands::price::execute(args, format)?,
        Commands::Kinds => commands::kinds::execute(format)?,
        Commands::Config(args) => commands::config::execute(args, format)?,
    }

    Ok(())
}

/// Logs go to stderr so that stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
