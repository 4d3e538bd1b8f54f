use crate::domain::speech::{ProviderKind, TtsProviderError, VoiceEntry};
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts one text-to-speech vendor (ElevenLabs, OpenAI, Groq).
///
/// Implementations are responsible for:
/// - Reporting whether a credential is configured
/// - Declaring the provider's per-request character limit
/// - Turning one chunk of text into one audio buffer (MP3)
/// - Enumerating the provider's voices
///
/// Chunking, ordering and fallback live in the speech service; adapters never retry.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Whether the provider's API key is present
    fn is_configured(&self) -> bool;

    /// Maximum characters accepted in one synthesis request
    fn max_chunk_chars(&self) -> usize;

    /// Synthesize a single chunk with a provider-native voice id
    ///
    /// # Errors
    /// - `ProviderUnavailable` when no credential is configured (no request is sent)
    /// - `QuotaExceeded` when the vendor reports quota or rate-limit exhaustion
    /// - `ProviderError` for other non-2xx responses
    /// - `NetworkError` on transport failure or timeout
    async fn synthesize_chunk(&self, text: &str, voice_id: &str)
        -> Result<Vec<u8>, TtsProviderError>;

    /// List the provider's voices with native (unprefixed) ids
    async fn list_voices(&self) -> Result<Vec<VoiceEntry>, TtsProviderError>;
}
