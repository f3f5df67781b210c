//! notecoach — personal note service with keyword project tagging and
//! coaching prompts. Drive backup ships as the separate drive-sync binary.

use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use notecoach::{api, db, AppState};

#[derive(Parser)]
#[command(name = "notecoach", version, about = "Personal note service with project tagging and coaching prompts")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "PORT")]
    port: u16,

    /// SQLite database path
    #[arg(short, long, default_value = "data/notes.sqlite3", env = "NOTECOACH_DB")]
    db: String,
}

#[tokio::main]
async fn main() {
    // load .env before the filter and clap `env` attrs read the environment
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    if let Some(dir) = std::path::Path::new(&args.db).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).expect("failed to create data directory");
        }
    }
    let store = db::NoteStore::open(&args.db).expect("failed to open database");
    let state = AppState {
        store: Arc::new(store),
        started_at: std::time::Instant::now(),
    };
    let app = api::router(state);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = args.port,
        db = %args.db,
        "notecoach starting"
    );

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("failed to register SIGTERM handler");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
    info!("shutting down");
}
