use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(format!("{e:#}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

/// Failures of the collaborators a dialogue turn depends on. These never
/// escape a turn; each is logged and rendered with [`DialogueError::apology`].
#[derive(Debug, thiserror::Error)]
pub enum DialogueError {
    #[error("{provider} provider unavailable: {reason}")]
    ProviderUnavailable {
        provider: &'static str,
        reason: String,
    },

    #[error("failed to persist booking: {0}")]
    PersistenceFailure(String),
}

impl DialogueError {
    pub fn apology(&self) -> String {
        match self {
            DialogueError::ProviderUnavailable { provider, .. } => format!(
                "Sorry, the {provider} service is unavailable right now. Please try again in a moment."
            ),
            DialogueError::PersistenceFailure(_) => {
                "Sorry, I couldn't save your booking right now. Please tell me your name again to retry."
                    .to_string()
            }
        }
    }
}
