use crate::domain::tts::SpeechSynthesisRequest;
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the remote speech provider so tests can substitute a stub.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize a fully built provider request
    ///
    /// Returns the raw audio bytes in the requested encoding
    ///
    /// # Errors
    /// Returns the provider's error text if the call fails. Callers inspect
    /// this text to recognise rejected voices, so implementations must keep
    /// the provider message intact.
    async fn synthesize(&self, request: &SpeechSynthesisRequest) -> Result<Vec<u8>, String>;
}
