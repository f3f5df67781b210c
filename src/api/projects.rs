//! Project context handler.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::blocking;
use crate::error::CoachError;
use crate::AppState;

const DEFAULT_CONTEXT_LIMIT: u32 = 20;

#[derive(Debug, Deserialize)]
pub(super) struct ContextBody {
    #[serde(default)]
    project_name: String,
    limit: Option<u32>,
}

pub(super) async fn get_project_context(
    State(state): State<AppState>,
    Json(body): Json<ContextBody>,
) -> Result<Json<serde_json::Value>, CoachError> {
    if body.project_name.trim().is_empty() {
        return Err(CoachError::MissingProjectName);
    }
    let limit = body.limit.unwrap_or(DEFAULT_CONTEXT_LIMIT);

    let store = state.store.clone();
    let name = body.project_name.clone();
    let ctx = blocking(move || store.project_context(&name, limit)).await??;

    let notes: Vec<serde_json::Value> = ctx
        .notes
        .into_iter()
        .map(|n| {
            serde_json::json!({
                "id": n.id,
                "content": n.content,
                "timestamp": n.timestamp,
                "tags": n.tags,
            })
        })
        .collect();

    Ok(Json(serde_json::json!({
        "project_name": body.project_name,
        "note_count": notes.len(),
        "notes": notes,
        "project_description": ctx
            .description
            .unwrap_or_else(|| "Auto-detected project".to_string()),
    })))
}
