//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{infrastructure::dto::http::RoomStateDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current room snapshot in roster order
pub async fn get_room_state(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoomStateDto>, StatusCode> {
    match state.get_room_state_usecase.execute().await {
        // Domain Model から DTO への変換
        Ok(room) => Ok(Json(RoomStateDto::from(&room))),
        Err(e) => {
            tracing::error!("Failed to get room state: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
