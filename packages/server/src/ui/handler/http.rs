//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{HistoryStatusDto, StatusDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Registry status: connection count and history fill level
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusDto> {
    Json(StatusDto {
        connections: state.registry.member_count().await,
        history: HistoryStatusDto {
            length: state.registry.history_len().await,
            capacity: state.registry.history_capacity(),
        },
        started_at: state.started_at.clone(),
    })
}
