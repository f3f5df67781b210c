use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;

use crate::error::CoachError;
use crate::{db, AppState};

mod coaching;
mod notes;
mod projects;

use coaching::*;
use notes::*;
use projects::*;

/// Run a blocking closure on the spawn_blocking pool and map JoinError.
async fn blocking<T, F>(f: F) -> Result<T, CoachError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| CoachError::Internal(e.to_string()))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/tools/save_note", post(save_note))
        .route("/tools/get_project_context", post(get_project_context))
        .route("/tools/search_notes", post(search_notes))
        .route("/tools/start_coaching_session", post(start_coaching_session))
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        // the front-end is opened straight from disk in dev, so requests
        // arrive cross-origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET / — the note-taking front-end.
async fn index() -> impl axum::response::IntoResponse {
    axum::response::Html(include_str!("../../web/index.html"))
}

/// GET /health — process and store counts. Store failures degrade to
/// zeroed counts rather than erroring.
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let store = state.store.clone();
    let (stats, db_size_mb) = blocking(move || {
        let s = store.stats();
        let bytes = store.db_size_bytes();
        let mb = (bytes as f64 / 1048576.0 * 10.0).round() / 10.0;
        (s, mb)
    })
    .await
    .unwrap_or((db::Stats::default(), 0.0));

    Json(serde_json::json!({
        "name": "notecoach",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "db": {
            "notes": stats.notes,
            "projects": stats.projects,
            "size_mb": db_size_mb,
        },
    }))
}
