//! Note save and search handlers.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::blocking;
use crate::error::CoachError;
use crate::{classify, db, AppState};

pub(super) async fn save_note(
    State(state): State<AppState>,
    Json(input): Json<db::NoteInput>,
) -> Result<Json<serde_json::Value>, CoachError> {
    // Empty hints fall through to the classifier, same as missing ones.
    let project = input
        .project_hint
        .clone()
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| classify::detect_project(&input.content).to_string());
    let tags = input.tags.clone().unwrap_or_default();

    let store = state.store.clone();
    let label = project.clone();
    let note_id = blocking(move || store.save_note(input, &label)).await??;

    Ok(Json(serde_json::json!({
        "success": true,
        "note_id": note_id,
        "project_detected": project,
        "tags": tags,
        "message": "Note saved successfully",
    })))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchBody {
    query: Option<String>,
    project_filter: Option<String>,
}

pub(super) async fn search_notes(
    State(state): State<AppState>,
    body: axum::body::Bytes,
) -> Result<Json<serde_json::Value>, CoachError> {
    // An absent or empty body means "match everything".
    let req: SearchBody = if body.is_empty() {
        SearchBody::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| CoachError::Validation(format!("invalid body: {e}")))?
    };

    let store = state.store.clone();
    let query = req.query.clone();
    let project = req.project_filter.clone();
    let found = blocking(move || store.search_notes(query.as_deref(), project.as_deref()))
        .await??;

    let results: Vec<serde_json::Value> = found
        .into_iter()
        .map(|n| {
            serde_json::json!({
                "id": n.id,
                "content": n.content,
                "timestamp": n.timestamp,
                "project": n.project,
                "tags": n.tags,
            })
        })
        .collect();

    Ok(Json(serde_json::json!({
        "query": req.query.as_deref().unwrap_or(""),
        "project_filter": req.project_filter,
        "results": results,
    })))
}
