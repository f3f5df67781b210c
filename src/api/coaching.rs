//! Coaching session handler. Pure template fill, no store access.

use axum::Json;
use serde::Deserialize;

use crate::error::CoachError;
use crate::prompts;

#[derive(Debug, Deserialize)]
pub(super) struct SessionBody {
    #[serde(default)]
    project_name: String,
    focus_area: Option<String>,
    #[serde(default = "default_session_type")]
    session_type: String,
}

fn default_session_type() -> String {
    prompts::DEFAULT_SESSION_TYPE.to_string()
}

pub(super) async fn start_coaching_session(
    Json(body): Json<SessionBody>,
) -> Result<Json<serde_json::Value>, CoachError> {
    if body.project_name.trim().is_empty() {
        return Err(CoachError::MissingProjectName);
    }
    let focus = body.focus_area.as_deref().filter(|f| !f.is_empty());
    let prompt = prompts::coaching_prompt(&body.project_name, &body.session_type, focus);

    Ok(Json(serde_json::json!({
        "project_name": body.project_name,
        "focus_area": body.focus_area,
        "session_type": body.session_type,
        "coaching_prompt": prompt,
        "suggested_questions": prompts::SUGGESTED_QUESTIONS,
        "context_needed": true,
    })))
}
