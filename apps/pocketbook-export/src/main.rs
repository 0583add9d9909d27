//! PocketBook Export
//!
//! Command line entry point: validates the database path, sets up logging
//! and runs a single export.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

use cli::{Cli, DEFAULT_FILTER};
use pocketbook_export::{export, Config, ExportError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli) {
        eprintln!("error: failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    // Reject a bad path before anything touches the database.
    if !cli.database.is_file() {
        return report_error(ExportError::DatabaseNotFound(cli.database));
    }

    dotenvy::dotenv().ok();
    let config = cli.into_config(Config::from_env());

    match export(&config).await {
        Ok(summary) => {
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => report_error(e),
    }
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let filter = match cli.log_directive() {
        Some(directive) => EnvFilter::try_new(directive)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

fn report_error(error: ExportError) -> ExitCode {
    eprintln!("error: {}", error);
    ExitCode::from(error.exit_code())
}
