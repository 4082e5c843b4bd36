use crate::{conn::test_connections, error::CliError};
use clap::Parser;
use commands::Commands;
use engine_config::{env::EnvManager, settings::EtlSettings};
use engine_core::observer::TracingObserver;
use engine_runtime::execution::executor;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod conn;
mod error;
mod output;

const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Parser)]
#[command(
    name = "sqlite-to-postgres",
    version = "0.1.0",
    about = "Moves the movie catalogue from SQLite into PostgreSQL"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate {
            env_file,
            sqlite_db,
            batch_size,
        } => {
            let settings = load_settings(env_file.as_deref(), sqlite_db, batch_size)?;
            let summary = executor::run(&settings, Arc::new(TracingObserver)).await?;

            let skipped: Vec<&str> = summary.skipped().collect();
            if skipped.is_empty() {
                info!(rows = summary.total_rows(), "Migration finished");
            } else {
                warn!(rows = summary.total_rows(), skipped = ?skipped, "Migration finished with skipped tables");
            }
        }
        Commands::Verify { env_file, output } => {
            let settings = load_settings(env_file.as_deref(), None, None)?;
            let report = verifier::run(&settings).await?;

            match output {
                Some(path) => output::write_report(&report, &path).await?,
                None => output::print_report(&report)?,
            }

            let failed = report.failed().count();
            if failed > 0 {
                return Err(CliError::Inconsistent(failed));
            }
        }
        Commands::TestConn { env_file } => {
            let settings = load_settings(env_file.as_deref(), None, None)?;
            test_connections(&settings).await?;
        }
    }

    Ok(())
}

/// Process environment, overlaid by the given `.env` file or `./.env` when it
/// exists, then by command-line overrides.
fn load_settings(
    env_file: Option<&Path>,
    sqlite_db: Option<PathBuf>,
    batch_size: Option<usize>,
) -> Result<EtlSettings, CliError> {
    let mut env = EnvManager::new();
    match env_file {
        Some(path) => env.load_from_file(path)?,
        None if Path::new(DEFAULT_ENV_FILE).is_file() => env.load_from_file(DEFAULT_ENV_FILE)?,
        None => {}
    }
    settings_from(&env, sqlite_db, batch_size)
}

fn settings_from(
    env: &EnvManager,
    sqlite_db: Option<PathBuf>,
    batch_size: Option<usize>,
) -> Result<EtlSettings, CliError> {
    let mut settings = EtlSettings::from_env(env)?;
    if let Some(path) = sqlite_db {
        settings = settings.with_sqlite_path(path);
    }
    if let Some(size) = batch_size {
        settings = settings.with_batch_size(size)?;
    }
    Ok(settings)
}
