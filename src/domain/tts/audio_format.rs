use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::provider::AudioEncoding;

/// Output formats a caller may request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
    Ogg,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "MP3",
            AudioFormat::Wav => "WAV",
            AudioFormat::Ogg => "OGG",
        }
    }

    /// File extension used for history entries
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Ogg => "ogg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Ogg => "audio/ogg",
        }
    }

    /// Provider encoding for this format
    pub fn encoding(&self) -> AudioEncoding {
        match self {
            AudioFormat::Mp3 => AudioEncoding::Mp3,
            AudioFormat::Wav => AudioEncoding::Linear16,
            AudioFormat::Ogg => AudioEncoding::OggOpus,
        }
    }

    /// Recover the format of a stored file from its extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "mp3" => Some(AudioFormat::Mp3),
            "wav" => Some(AudioFormat::Wav),
            "ogg" => Some(AudioFormat::Ogg),
            _ => None,
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported audio format '{0}', expected one of MP3, WAV, OGG")]
pub struct UnsupportedFormat(pub String);

impl FromStr for AudioFormat {
    type Err = UnsupportedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MP3" => Ok(AudioFormat::Mp3),
            "WAV" => Ok(AudioFormat::Wav),
            "OGG" => Ok(AudioFormat::Ogg),
            _ => Err(UnsupportedFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for AudioFormat {
    type Error = UnsupportedFormat;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AudioFormat> for String {
    fn from(format: AudioFormat) -> Self {
        format.as_str().to_string()
    }
}
