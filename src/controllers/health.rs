use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::history::HistoryService;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(history_service): State<Arc<HistoryService>>) -> impl IntoResponse {
    if history_service.is_ready().await {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "history_dir": "accessible"
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "history_dir": "inaccessible"
            })),
        )
    }
}
