use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::DialogueState;
use crate::services::conversation;
use crate::state::AppState;

const MAX_SESSION_ID_LEN: usize = 128;

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub response: String,
    pub state: DialogueState,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session_id = match payload.session_id {
        Some(id) => {
            let id = id.trim().to_string();
            if id.is_empty() || id.len() > MAX_SESSION_ID_LEN {
                return Err(AppError::BadRequest(format!(
                    "session_id must be 1-{MAX_SESSION_ID_LEN} characters"
                )));
            }
            id
        }
        None => uuid::Uuid::new_v4().to_string(),
    };
    let message = payload.message.trim();

    tracing::info!(session = %session_id, message = %message, "incoming chat message");

    if message.is_empty() {
        let current = state
            .sessions
            .snapshot(&session_id)
            .await
            .map(|ctx| ctx.state())
            .unwrap_or(DialogueState::Idle);
        return Ok(Json(ChatResponse {
            session_id,
            response: "Please say something!".to_string(),
            state: current,
        }));
    }

    let turn = conversation::handle_turn(&state, &session_id, message).await;

    Ok(Json(ChatResponse {
        session_id,
        response: turn.reply,
        state: turn.state,
    }))
}
