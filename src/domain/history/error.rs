use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum HistoryServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("access denied: {0}")]
    Forbidden(String),
    #[error("history entry not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for HistoryServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Forbidden(msg) => HistoryServiceError::Forbidden(msg),
            AppError::NotFound(msg) => HistoryServiceError::NotFound(msg),
            AppError::Internal(msg) => HistoryServiceError::Dependency(msg),
            _ => HistoryServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<HistoryServiceError> for AppError {
    fn from(err: HistoryServiceError) -> Self {
        match err {
            HistoryServiceError::Forbidden(msg) => AppError::Forbidden(msg),
            HistoryServiceError::NotFound(msg) => AppError::NotFound(msg),
            HistoryServiceError::Dependency(msg) => AppError::Internal(msg),
            HistoryServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
