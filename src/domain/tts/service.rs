use super::error::TtsServiceError;
use super::provider::{is_invalid_voice_error, SpeechSynthesisRequest};
use super::preview::{preview_sentences, DEFAULT_PREVIEW_LANGUAGE};
use super::{AudioFormat, PreviewRequest, SynthesisRequest};
use crate::infrastructure::repositories::{HistoryRepository, TtsRepository};
use async_trait::async_trait;
use std::sync::Arc;

/// Synthesized audio held only for the duration of a request
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub audio_data: Vec<u8>,
    pub format: AudioFormat,
}

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    history_repo: Arc<HistoryRepository>,
}

impl TtsService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, history_repo: Arc<HistoryRepository>) -> Self {
        Self {
            tts_repo,
            history_repo,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize the server-chosen preview sentence for a voice.
    ///
    /// The result is MP3 at the default speaking rate and is not persisted.
    async fn preview(&self, request: PreviewRequest) -> Result<AudioArtifact, TtsServiceError>;

    /// Synthesize caller text and store it in the history directory.
    ///
    /// Returns the generated history filename.
    async fn synthesize(&self, request: SynthesisRequest) -> Result<String, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn preview(&self, request: PreviewRequest) -> Result<AudioArtifact, TtsServiceError> {
        tracing::info!(
            language = %request.language,
            voice = %request.voice,
            "Voice preview request"
        );
        if !preview_sentences().contains(&request.language) {
            tracing::debug!(
                language = %request.language,
                fallback = DEFAULT_PREVIEW_LANGUAGE,
                "No preview sentence for language, using fallback"
            );
        }

        let request = SynthesisRequest::from(request);
        self.generate_audio(&request).await
    }

    async fn synthesize(&self, request: SynthesisRequest) -> Result<String, TtsServiceError> {
        tracing::info!(
            language = %request.language,
            voice = %request.voice,
            format = %request.format,
            speaking_rate = request.speaking_rate,
            text_length = request.text.len(),
            "TTS synthesis request"
        );

        let artifact = self.generate_audio(&request).await?;

        let filename = self
            .history_repo
            .put(&artifact.audio_data, artifact.format)
            .await?;

        tracing::info!(
            filename = %filename,
            audio_size = artifact.audio_data.len(),
            "Synthesized audio stored in history"
        );

        Ok(filename)
    }
}

impl TtsService {
    /// Translate a payload into a provider request and return the raw audio.
    ///
    /// Provider errors saying the voice is unknown for the language become
    /// [`TtsServiceError::InvalidVoice`]; anything else is a dependency error.
    /// Failures are not retried.
    pub async fn generate_audio(
        &self,
        request: &SynthesisRequest,
    ) -> Result<AudioArtifact, TtsServiceError> {
        Self::validate(request)?;

        let provider_request = SpeechSynthesisRequest::from(request);

        let audio_data = self
            .tts_repo
            .synthesize(&provider_request)
            .await
            .map_err(|e| {
                if is_invalid_voice_error(&e) {
                    tracing::warn!(
                        voice = %request.voice,
                        language = %request.language,
                        provider_error = %e,
                        "Provider rejected voice for language"
                    );
                    TtsServiceError::InvalidVoice {
                        voice: request.voice.clone(),
                        language: request.language.clone(),
                    }
                } else {
                    TtsServiceError::Dependency(e)
                }
            })?;

        Ok(AudioArtifact {
            audio_data,
            format: request.format,
        })
    }

    fn validate(request: &SynthesisRequest) -> Result<(), TtsServiceError> {
        if request.text.trim().is_empty() {
            return Err(TtsServiceError::Invalid("Text cannot be empty".to_string()));
        }
        if request.language.trim().is_empty() {
            return Err(TtsServiceError::Invalid(
                "Language cannot be empty".to_string(),
            ));
        }
        if request.voice.trim().is_empty() {
            return Err(TtsServiceError::Invalid("Voice cannot be empty".to_string()));
        }
        Ok(())
    }
}
