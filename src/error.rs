use axum::http::StatusCode;
use axum::Json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum CoachError {
    #[error("content is required")]
    EmptyContent,

    #[error("project name is required")]
    MissingProjectName,

    #[error("content exceeds maximum length")]
    ContentTooLong,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl CoachError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl axum::response::IntoResponse for CoachError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        // Store internals never reach clients; the detail goes to the log.
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "internal error".to_string()
        } else {
            self.to_string()
        };
        let body = Json(serde_json::json!({ "error": message }));
        (status, body).into_response()
    }
}
