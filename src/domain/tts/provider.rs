use serde::Serialize;

use super::SynthesisRequest;

/// Substring marking text as provider markup rather than plain text
pub const MARKUP_MARKER: &str = "[pause";

/// Voice family every request is routed to
pub const VOICE_FAMILY: &str = "Chirp3-HD";

/// Provider error fragments meaning the voice/language pair was rejected
const INVALID_VOICE_PATTERNS: &[&str] = &["Could not find voice", "is not supported for the language"];

/// Request shape understood by the speech provider
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechSynthesisRequest {
    pub input: SynthesisInput,
    pub voice: VoiceSelection,
    pub audio_config: AudioConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisInput {
    Text(String),
    Markup(String),
}

impl SynthesisInput {
    /// Classify text as markup when it embeds a pause directive
    pub fn classify(text: &str) -> Self {
        if text.contains(MARKUP_MARKER) {
            SynthesisInput::Markup(text.to_string())
        } else {
            SynthesisInput::Text(text.to_string())
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SynthesisInput::Text(_) => "text",
            SynthesisInput::Markup(_) => "markup",
        }
    }

    /// Length of the input in bytes
    pub fn byte_len(&self) -> usize {
        match self {
            SynthesisInput::Text(s) | SynthesisInput::Markup(s) => s.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelection {
    pub language_code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    pub audio_encoding: AudioEncoding,
    pub speaking_rate: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    Mp3,
    Linear16,
    OggOpus,
}

/// Full provider voice name, e.g. `en-US-Chirp3-HD-Aoede`
pub fn voice_name(language: &str, voice: &str) -> String {
    format!("{}-{}-{}", language, VOICE_FAMILY, voice)
}

impl From<&SynthesisRequest> for SpeechSynthesisRequest {
    fn from(request: &SynthesisRequest) -> Self {
        Self {
            input: SynthesisInput::classify(&request.text),
            voice: VoiceSelection {
                language_code: request.language.clone(),
                name: voice_name(&request.language, &request.voice),
            },
            audio_config: AudioConfig {
                audio_encoding: request.format.encoding(),
                speaking_rate: request.speaking_rate,
            },
        }
    }
}

/// Whether a provider error says the voice does not exist for the language
pub fn is_invalid_voice_error(message: &str) -> bool {
    INVALID_VOICE_PATTERNS
        .iter()
        .any(|pattern| message.contains(pattern))
}
