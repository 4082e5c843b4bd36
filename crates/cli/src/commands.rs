use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy every table from SQLite into PostgreSQL
    Migrate {
        #[arg(long, help = "Path to a .env file (defaults to ./.env when present)")]
        env_file: Option<PathBuf>,

        #[arg(long, help = "Overrides SQLITE_DB")]
        sqlite_db: Option<PathBuf>,

        #[arg(long, help = "Overrides BATCH_SIZE (rows per page)")]
        batch_size: Option<usize>,
    },
    /// Compare row counts and field values between both stores
    Verify {
        #[arg(long, help = "Path to a .env file (defaults to ./.env when present)")]
        env_file: Option<PathBuf>,

        #[arg(
            long,
            help = "If specified, writes the JSON report to this file instead of stdout"
        )]
        output: Option<PathBuf>,
    },
    /// Check that both stores are reachable
    TestConn {
        #[arg(long, help = "Path to a .env file (defaults to ./.env when present)")]
        env_file: Option<PathBuf>,
    },
}
