//! Backs the local SQLite database up to Google Drive.
//!
//! One-shot and sequential, no retries: authenticate, look the remote file
//! up by name, then download (remote wins) or upload (local wins), and
//! record the remote file id in the env file. Not safe to run while the
//! server is writing to the same database file.

pub mod drive;
pub mod envfile;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use drive::DriveClient;

/// Remote file name the backup lives under.
pub const DEFAULT_REMOTE_NAME: &str = "note-coach-database.sqlite3";

/// Env key that carries the Drive file id across runs.
pub const FILE_ID_KEY: &str = "GOOGLE_DRIVE_DATABASE_FILE_ID";

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("missing {0} (set it in .env or the environment)")]
    MissingCredentials(&'static str),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("drive api returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Everything a sync run needs, resolved before any network call.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub remote_name: String,
    pub local_db: PathBuf,
    pub env_file: PathBuf,
}

impl SyncConfig {
    /// Build from the environment (after dotenvy has loaded the env file).
    /// Fails naming the first missing credential; empty values count as
    /// missing.
    pub fn from_env(
        local_db: PathBuf,
        env_file: PathBuf,
        remote_name: String,
    ) -> Result<Self, SyncError> {
        let var = |key: &'static str| {
            std::env::var(key)
                .ok()
                .filter(|v| !v.is_empty())
                .ok_or(SyncError::MissingCredentials(key))
        };
        Ok(Self {
            client_id: var("GOOGLE_CLIENT_ID")?,
            client_secret: var("GOOGLE_CLIENT_SECRET")?,
            refresh_token: var("GOOGLE_REFRESH_TOKEN")?,
            remote_name,
            local_db,
            env_file,
        })
    }
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A remote copy existed; it now overwrites the local file.
    Downloaded { file_id: String },
    /// No remote copy; the local file was uploaded.
    Uploaded { file_id: String },
}

impl SyncOutcome {
    pub fn file_id(&self) -> &str {
        match self {
            Self::Downloaded { file_id } | Self::Uploaded { file_id } => file_id,
        }
    }
}

/// Create the local database's parent directory when missing, so a fresh
/// checkout can receive a download (or an empty seed file) directly.
fn ensure_parent(path: &Path) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}

/// Run the whole procedure. Steps are sequential and the first failure
/// aborts the rest; local file changes already applied stay applied.
pub async fn run(config: &SyncConfig) -> Result<SyncOutcome, SyncError> {
    let client = DriveClient::connect(config).await?;
    info!("authenticated with Google Drive");

    // both arms write into the local path
    ensure_parent(&config.local_db)?;

    let outcome = match client.find_file(&config.remote_name).await? {
        Some(found) => {
            info!(file_id = %found.id, name = %found.name, "found existing database in Drive");
            let bytes = client.download(&found.id).await?;
            if let Ok(meta) = std::fs::metadata(&config.local_db) {
                if meta.len() > 0 {
                    warn!(
                        local_bytes = meta.len(),
                        remote_bytes = bytes.len(),
                        "overwriting local database with the Drive copy"
                    );
                }
            }
            std::fs::write(&config.local_db, &bytes)?;
            SyncOutcome::Downloaded { file_id: found.id }
        }
        None => {
            if !config.local_db.exists() {
                std::fs::write(&config.local_db, [])?;
            }
            let bytes = std::fs::read(&config.local_db)?;
            let file_id = client.upload(&config.remote_name, bytes).await?;
            info!(file_id = %file_id, "uploaded local database to Drive");
            SyncOutcome::Uploaded { file_id }
        }
    };

    envfile::set_var(&config.env_file, FILE_ID_KEY, outcome.file_id())?;
    info!(env_file = %config.env_file.display(), key = FILE_ID_KEY, "recorded file id");
    Ok(outcome)
}
