pub mod error;
pub mod retention;
pub mod service;

pub use error::HistoryServiceError;
pub use retention::spawn_retention_task;
pub use service::{HistoryAudio, HistoryService, HistoryServiceApi, DEFAULT_RETENTION_DAYS};

use serde::{Deserialize, Serialize};

/// URL prefix under which history entries are served
pub const HISTORY_URL_PREFIX: &str = "/history";

/// Public URL for a stored history entry
pub fn history_url(filename: &str) -> String {
    format!("{}/{}", HISTORY_URL_PREFIX, filename)
}

/// Response for DELETE /history/delete/{filename}
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}
