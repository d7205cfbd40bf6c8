use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("the voice \"{voice}\" is not valid for the language \"{language}\"")]
    InvalidVoice { voice: String, language: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for TtsServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => TtsServiceError::Invalid(msg),
            AppError::InvalidVoice { voice, language } => {
                TtsServiceError::InvalidVoice { voice, language }
            }
            AppError::Internal(msg) => TtsServiceError::Storage(msg),
            _ => TtsServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TtsServiceError::InvalidVoice { voice, language } => {
                AppError::InvalidVoice { voice, language }
            }
            TtsServiceError::Dependency(msg) => AppError::ExternalService(msg),
            TtsServiceError::Storage(msg) => AppError::Internal(msg),
            TtsServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
