use super::error::HistoryServiceError;
use crate::domain::tts::AudioFormat;
use crate::infrastructure::repositories::{DeleteOutcome, HistoryRepository};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::path::Path;
use std::sync::Arc;

/// Default age after which history entries are swept
pub const DEFAULT_RETENTION_DAYS: i64 = 7;

/// Bytes of a stored entry plus its content type
#[derive(Debug, Clone)]
pub struct HistoryAudio {
    pub audio_data: Vec<u8>,
    pub content_type: &'static str,
}

pub struct HistoryService {
    history_repo: Arc<HistoryRepository>,
    retention: Duration,
}

impl HistoryService {
    pub fn new(history_repo: Arc<HistoryRepository>, retention: Duration) -> Self {
        Self {
            history_repo,
            retention,
        }
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Whether the history directory is usable
    pub async fn is_ready(&self) -> bool {
        self.history_repo.is_accessible().await
    }
}

#[async_trait]
pub trait HistoryServiceApi: Send + Sync {
    /// Filenames, most recently modified first
    async fn list(&self) -> Result<Vec<String>, HistoryServiceError>;

    async fn read(&self, filename: &str) -> Result<HistoryAudio, HistoryServiceError>;

    /// Idempotent delete; refuses names that escape the history directory
    async fn delete(&self, filename: &str) -> Result<DeleteOutcome, HistoryServiceError>;

    /// Remove entries older than the retention window.
    ///
    /// A file exactly as old as the window is kept. Returns the number removed.
    async fn sweep(&self) -> Result<usize, HistoryServiceError>;
}

#[async_trait]
impl HistoryServiceApi for HistoryService {
    async fn list(&self) -> Result<Vec<String>, HistoryServiceError> {
        Ok(self.history_repo.list().await?)
    }

    async fn read(&self, filename: &str) -> Result<HistoryAudio, HistoryServiceError> {
        let audio_data = self.history_repo.read(filename).await?;

        let content_type = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(AudioFormat::from_extension)
            .map(|format| format.mime_type())
            .unwrap_or("application/octet-stream");

        Ok(HistoryAudio {
            audio_data,
            content_type,
        })
    }

    async fn delete(&self, filename: &str) -> Result<DeleteOutcome, HistoryServiceError> {
        Ok(self.history_repo.delete(filename).await?)
    }

    async fn sweep(&self) -> Result<usize, HistoryServiceError> {
        let threshold = Utc::now().checked_sub_signed(self.retention).ok_or_else(|| {
            HistoryServiceError::Other(anyhow::anyhow!(
                "retention of {} days is out of range",
                self.retention.num_days()
            ))
        })?;
        let deleted = self.history_repo.remove_older_than(threshold).await?;

        if deleted > 0 {
            tracing::info!(
                deleted,
                retention_days = self.retention.num_days(),
                "History cleanup finished, old audio files removed"
            );
        }

        Ok(deleted)
    }
}
