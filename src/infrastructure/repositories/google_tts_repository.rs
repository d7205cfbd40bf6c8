use super::tts_repository::TtsRepository;
use crate::domain::tts::SpeechSynthesisRequest;
use crate::infrastructure::oauth::GoogleCredentials;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

pub const GOOGLE_TTS_ENDPOINT: &str = "https://texttospeech.googleapis.com";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeSpeechResponse {
    audio_content: String,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Google Cloud Text-to-Speech implementation of TTS repository
pub struct GoogleTtsRepository {
    http_client: reqwest::Client,
    endpoint: String,
    credentials: GoogleCredentials,
}

impl GoogleTtsRepository {
    pub fn new(
        http_client: reqwest::Client,
        endpoint: impl Into<String>,
        credentials: GoogleCredentials,
    ) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
            credentials,
        }
    }

    fn synthesize_url(&self) -> String {
        format!("{}/v1/text:synthesize", self.endpoint.trim_end_matches('/'))
    }

    /// Pull the provider message out of an error body, keeping it verbatim
    fn error_message(status: reqwest::StatusCode, body: &str) -> String {
        match serde_json::from_str::<GoogleErrorBody>(body) {
            Ok(parsed) => format!(
                "{} {}: {}",
                status.as_u16(),
                parsed.error.status.unwrap_or_default(),
                parsed.error.message
            ),
            Err(_) => format!("{}: {}", status, body),
        }
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, request: &SpeechSynthesisRequest) -> Result<Vec<u8>, String> {
        tracing::info!(
            language = %request.voice.language_code,
            voice = %request.voice.name,
            encoding = ?request.audio_config.audio_encoding,
            speaking_rate = request.audio_config.speaking_rate,
            input_kind = request.input.kind(),
            text_length = request.input.byte_len(),
            "Calling Google synthesize_speech"
        );

        let http_request = self
            .credentials
            .authorize(self.http_client.post(self.synthesize_url()))
            .await?
            .json(request);

        let response = http_request.send().await.map_err(|e| {
            tracing::error!(
                error = %e,
                voice = %request.voice.name,
                "Google synthesize_speech request failed"
            );
            if e.is_timeout() {
                "Google TTS request timed out".to_string()
            } else {
                format!("Google TTS request failed: {}", e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = Self::error_message(status, &body);
            tracing::error!(
                status = %status.as_u16(),
                voice = %request.voice.name,
                language = %request.voice.language_code,
                error = %message,
                "Google synthesize_speech failed"
            );
            return Err(message);
        }

        let body: SynthesizeSpeechResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse Google TTS response: {}", e))?;

        let audio_data = STANDARD
            .decode(body.audio_content.as_bytes())
            .map_err(|e| format!("Invalid audio content from Google TTS: {}", e))?;

        tracing::debug!(
            audio_size = audio_data.len(),
            "Google synthesize_speech successful"
        );

        Ok(audio_data)
    }
}
