use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{ConversationContext, DialogueState};
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub state: DialogueState,
    pub context: ConversationContext,
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    let context = state
        .sessions
        .snapshot(&session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("session {session_id}")))?;

    Ok(Json(SessionView {
        session_id,
        state: context.state(),
        context,
    }))
}
