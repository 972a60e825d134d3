//! BookNest CLI - browse the catalog, fill a cart and manage an account.
//!
//! # Usage
//!
//! ```bash
//! # Browse fantasy books, cheapest first
//! booknest browse -g fantasy -s price-low
//!
//! # Search by title or author
//! booknest browse -q tolkien --view list
//!
//! # Add books 1 and 3 twice, then check out
//! booknest cart 1 3 3 --checkout
//!
//! # Create an account, then see who is signed in
//! booknest account sign-up -e emma@example.com -p secret -n Emma
//! booknest account whoami
//! ```
//!
//! # Environment Variables
//!
//! - `BOOKNEST_STORE` - `file` (default) or `memory`
//! - `BOOKNEST_DATA_DIR` - Directory for the file store (default `.booknest`)
//! - `BOOKNEST_LOG_FORMAT` - `pretty` (default) or `json`
//! - `RUST_LOG` - Log filter (default `booknest=info,booknest_storefront=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use booknest_storefront::config::ConfigError;
use booknest_storefront::{AppError, LogFormat, Storefront, StorefrontConfig, TracingNotifier};

mod commands;

/// Errors that end a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A storefront operation failed.
    #[error("{0}")]
    App(#[from] AppError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser)]
#[command(name = "booknest")]
#[command(author, version, about = "BookNest storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, filter and sort the catalog
    Browse(commands::browse::BrowseArgs),
    /// Build a cart and optionally check out
    Cart(commands::cart::CartArgs),
    /// Sign up, sign in, sign out or show the current account
    Account {
        #[command(subcommand)]
        action: commands::account::AccountAction,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env();
    init_tracing(log_format(&config));

    let result = config
        .map_err(CliError::from)
        .and_then(|config| run(cli, &config));

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }
}

/// Log format to start with; a broken configuration still gets the default.
fn log_format(config: &Result<StorefrontConfig, ConfigError>) -> LogFormat {
    config
        .as_ref()
        .map_or_else(|_| LogFormat::default(), |config| config.log_format)
}

fn report(err: &CliError) {
    tracing::error!("Command failed: {err}");
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("booknest=info,booknest_storefront=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), CliError> {
    let mut storefront = Storefront::from_config(config, Arc::new(TracingNotifier))?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Browse(args) => commands::browse::run(&storefront, &args, &mut out)?,
        Commands::Cart(args) => commands::cart::run(&mut storefront, &args, &mut out)?,
        Commands::Account { action } => commands::account::run(&storefront, &action, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
