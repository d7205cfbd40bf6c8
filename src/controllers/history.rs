use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::{
    domain::history::{DeleteResponse, HistoryService, HistoryServiceApi},
    error::AppResult,
    infrastructure::repositories::DeleteOutcome,
};

pub struct HistoryController {
    history_service: Arc<HistoryService>,
}

impl HistoryController {
    pub fn new(history_service: Arc<HistoryService>) -> Self {
        Self { history_service }
    }

    /// GET /history-list - Stored filenames, newest first
    pub async fn list(
        State(controller): State<Arc<HistoryController>>,
    ) -> AppResult<Json<Vec<String>>> {
        Ok(Json(controller.history_service.list().await?))
    }

    /// GET /history/:filename - Raw audio bytes of one entry
    pub async fn serve(
        State(controller): State<Arc<HistoryController>>,
        Path(filename): Path<String>,
    ) -> AppResult<impl IntoResponse> {
        let audio = controller.history_service.read(&filename).await?;

        Ok(([(header::CONTENT_TYPE, audio.content_type)], audio.audio_data))
    }

    /// DELETE /history/delete/*filename - Idempotent removal of one entry
    pub async fn delete(
        State(controller): State<Arc<HistoryController>>,
        Path(filename): Path<String>,
    ) -> AppResult<Json<DeleteResponse>> {
        let message = match controller.history_service.delete(&filename).await? {
            DeleteOutcome::Deleted => "File deleted successfully.",
            DeleteOutcome::AlreadyAbsent => "File did not exist.",
        };

        Ok(Json(DeleteResponse {
            success: true,
            message: message.to_string(),
        }))
    }
}
