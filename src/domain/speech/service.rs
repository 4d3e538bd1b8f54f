use super::catalog::{static_fallback_voices, tag_voices, VoiceEntry};
use super::chunker::split_into_chunks;
use super::error::{SpeechServiceError, TtsProviderError};
use super::normalizer::normalize_script;
use super::provider::ProviderKind;
use super::registry::TtsProviderRegistry;
use super::voice::VoiceSelector;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_selector: String,
}

#[derive(Debug, Clone)]
pub struct AudioResult {
    pub audio_data: Vec<u8>,
    pub provider: ProviderKind,
    pub voice_id: String,
    pub chunk_count: usize,
}

pub struct SpeechService {
    registry: Arc<TtsProviderRegistry>,
}

impl SpeechService {
    pub fn new(registry: Arc<TtsProviderRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TtsProviderRegistry {
        &self.registry
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Turn a meditation script into one MP3 buffer
    ///
    /// This operation:
    /// - Normalizes the script (markup and leading metadata removed)
    /// - Resolves the voice selector to a provider and voice
    /// - Tries providers in order, chunking per provider limit, failing over whole
    ///   provider attempts
    ///
    /// Once `cancel` fires no further provider call is issued.
    async fn synthesize(
        &self,
        request: SynthesisRequest,
        cancel: CancellationToken,
    ) -> Result<AudioResult, SpeechServiceError>;

    /// Voices across all configured providers; never empty
    async fn list_voices(&self) -> Vec<VoiceEntry>;
}

enum AttemptError {
    Provider(TtsProviderError),
    Cancelled,
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn synthesize(
        &self,
        request: SynthesisRequest,
        cancel: CancellationToken,
    ) -> Result<AudioResult, SpeechServiceError> {
        let start_time = Instant::now();

        let text = normalize_script(&request.text);
        tracing::info!(
            original_length = request.text.len(),
            cleaned_length = text.len(),
            voice_selector = %request.voice_selector,
            "Script normalized for synthesis"
        );

        let default_provider = self.registry.default_provider().map(|provider| provider.kind());
        let selector = VoiceSelector::parse(&request.voice_selector).resolve_default(default_provider);
        let attempts = self.registry.attempt_order(selector.explicit_provider);

        if attempts.is_empty() {
            tracing::error!("No text-to-speech providers are configured");
            return Err(SpeechServiceError::AllProvidersExhausted {
                detail: "no text-to-speech providers are configured".to_string(),
            });
        }

        if text.trim().is_empty() {
            return Err(SpeechServiceError::EmptyText);
        }

        let mut last_error: Option<TtsProviderError> = None;

        for (attempt, provider) in attempts.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(SpeechServiceError::Cancelled);
            }

            let voice_id = selector.voice_for(provider.kind());
            tracing::info!(
                provider = %provider.kind(),
                voice = %voice_id,
                attempt = attempt + 1,
                "Starting provider attempt"
            );

            match synthesize_with(provider.as_ref(), &text, &voice_id, &cancel).await {
                Ok((audio_data, chunk_count)) => {
                    tracing::info!(
                        provider = %provider.kind(),
                        voice = %voice_id,
                        latency_ms = start_time.elapsed().as_millis(),
                        characters_count = text.chars().count(),
                        chunk_count = chunk_count,
                        audio_size_bytes = audio_data.len(),
                        "TTS synthesis completed"
                    );
                    return Ok(AudioResult {
                        audio_data,
                        provider: provider.kind(),
                        voice_id,
                        chunk_count,
                    });
                }
                Err(AttemptError::Cancelled) => {
                    tracing::info!(provider = %provider.kind(), "TTS synthesis cancelled");
                    return Err(SpeechServiceError::Cancelled);
                }
                Err(AttemptError::Provider(e)) => {
                    tracing::warn!(
                        provider = %provider.kind(),
                        voice = %voice_id,
                        error = %e,
                        "Provider attempt failed, trying next provider"
                    );
                    last_error = Some(e);
                }
            }
        }

        let last_provider = last_error.as_ref().map(|e| e.provider().as_str());
        let detail = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no provider produced audio".to_string());
        tracing::error!(
            attempts = attempts.len(),
            last_provider = ?last_provider,
            last_error = %detail,
            "All text-to-speech providers exhausted"
        );

        Err(SpeechServiceError::AllProvidersExhausted { detail })
    }

    async fn list_voices(&self) -> Vec<VoiceEntry> {
        let mut voices = Vec::new();

        for provider in self.registry.configured() {
            match provider.list_voices().await {
                Ok(entries) => {
                    tracing::debug!(
                        provider = %provider.kind(),
                        voice_count = entries.len(),
                        "Provider voices listed"
                    );
                    voices.extend(tag_voices(provider.kind(), entries));
                }
                Err(e) => {
                    tracing::warn!(
                        provider = %provider.kind(),
                        error = %e,
                        "Voice enumeration failed, omitting provider"
                    );
                }
            }
        }

        if voices.is_empty() {
            tracing::warn!("No provider voices available, serving static fallback list");
            return static_fallback_voices();
        }

        voices
    }
}

/// Synthesize every chunk with one provider, in order, stopping at the first failure.
/// Audio from a failed attempt is dropped with the local buffer.
async fn synthesize_with(
    provider: &dyn TtsRepository,
    text: &str,
    voice_id: &str,
    cancel: &CancellationToken,
) -> Result<(Vec<u8>, usize), AttemptError> {
    let chunks = split_into_chunks(text, provider.max_chunk_chars());
    let mut merged_audio = Vec::new();

    for (index, chunk) in chunks.iter().enumerate() {
        let audio_data = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AttemptError::Cancelled),
            result = provider.synthesize_chunk(chunk, voice_id) => {
                result.map_err(AttemptError::Provider)?
            }
        };
        merged_audio.extend(audio_data);

        tracing::debug!(
            provider = %provider.kind(),
            chunk_index = index,
            chunk_count = chunks.len(),
            total_audio_size = merged_audio.len(),
            "Chunk synthesized and merged"
        );
    }

    Ok((merged_audio, chunks.len()))
}
