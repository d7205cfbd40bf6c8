pub mod audio_format;
pub mod error;
pub mod preview;
pub mod provider;
pub mod service;

pub use audio_format::AudioFormat;
pub use error::TtsServiceError;
pub use preview::{lookup_preview_sentence, preview_sentences, DEFAULT_PREVIEW_LANGUAGE};
pub use provider::SpeechSynthesisRequest;
pub use service::{AudioArtifact, TtsService, TtsServiceApi};

use serde::{Deserialize, Serialize};

pub const DEFAULT_SPEAKING_RATE: f32 = 1.0;

fn default_speaking_rate() -> f32 {
    DEFAULT_SPEAKING_RATE
}

/// Request for POST /synthesize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub text: String,
    pub language: String,
    pub voice: String,
    #[serde(default)]
    pub format: AudioFormat,
    #[serde(default = "default_speaking_rate")]
    pub speaking_rate: f32,
}

/// Request for POST /preview-voice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub language: String,
    pub voice: String,
}

impl From<PreviewRequest> for SynthesisRequest {
    fn from(request: PreviewRequest) -> Self {
        Self {
            text: lookup_preview_sentence(&request.language).to_string(),
            language: request.language,
            voice: request.voice,
            format: AudioFormat::Mp3,
            speaking_rate: DEFAULT_SPEAKING_RATE,
        }
    }
}

/// Response for POST /preview-voice
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub audio_content: String,
    pub audio_format: AudioFormat,
}

/// Response for POST /synthesize
#[derive(Debug, Serialize, Deserialize)]
pub struct SynthesizeResponse {
    pub audio_url: String,
}
