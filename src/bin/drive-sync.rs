//! Sync the local notes database with Google Drive.
//!
//! A remote copy wins when one exists; otherwise the local file is
//! uploaded. The resulting file id lands in the env file so later runs
//! find the same backup.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use notecoach::sync::{self, SyncConfig, SyncOutcome};

#[derive(Parser)]
#[command(name = "drive-sync", version, about = "Back the notes database up to Google Drive")]
struct Args {
    /// Local SQLite database path
    #[arg(short, long, default_value = "data/notes.sqlite3", env = "NOTECOACH_DB")]
    db: PathBuf,

    /// Env file to load credentials from and write the Drive file id to
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// Name of the database file in Drive
    #[arg(long, default_value = sync::DEFAULT_REMOTE_NAME)]
    remote_name: String,
}

const SETUP_HELP: &str = "\
Google Drive sync needs OAuth credentials. Manual setup:

  1. Go to https://console.cloud.google.com/ and create (or pick) a project
  2. Enable the Google Drive API
  3. Create OAuth client ID credentials (Desktop app)
  4. Obtain a refresh token for the drive.file scope
  5. Put the values in .env:
       GOOGLE_CLIENT_ID=...
       GOOGLE_CLIENT_SECRET=...
       GOOGLE_REFRESH_TOKEN=...

Then run drive-sync again.";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    match sync::envfile::seed_from_example(&args.env_file) {
        Ok(true) => info!(env_file = %args.env_file.display(), "created env file from .env.example"),
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "could not seed env file");
            return ExitCode::FAILURE;
        }
    }
    dotenvy::from_path(&args.env_file).ok();

    let config = match SyncConfig::from_env(args.db, args.env_file, args.remote_name) {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            eprintln!("\n{SETUP_HELP}");
            return ExitCode::FAILURE;
        }
    };

    match sync::run(&config).await {
        Ok(SyncOutcome::Downloaded { file_id }) => {
            println!("Downloaded database from Drive (file id {file_id})");
            ExitCode::SUCCESS
        }
        Ok(SyncOutcome::Uploaded { file_id }) => {
            println!("Uploaded database to Drive (file id {file_id})");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("sync failed: {e}");
            ExitCode::FAILURE
        }
    }
}
