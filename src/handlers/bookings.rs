use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::models::BookingRecord;
use crate::state::AppState;

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookingRecord>>, AppError> {
    let bookings = state.store.list_all().await.map_err(|e| {
        tracing::error!(error = %e, "failed to list bookings");
        AppError::from(e)
    })?;
    Ok(Json(bookings))
}
