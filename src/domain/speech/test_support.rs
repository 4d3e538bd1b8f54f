//! In-memory speech provider for exercising the registry and fallback chain.

use super::catalog::VoiceEntry;
use super::error::TtsProviderError;
use super::provider::ProviderKind;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub struct MockProvider {
    kind: ProviderKind,
    configured: bool,
    max_chunk: usize,
    audio_prefix: Vec<u8>,
    fail_at: Option<(usize, TtsProviderError)>,
    voices: Result<Vec<VoiceEntry>, TtsProviderError>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockProvider {
    /// Every chunk succeeds with `audio_prefix` followed by the chunk text as bytes
    pub fn succeeding(kind: ProviderKind, audio_prefix: &[u8]) -> Self {
        Self {
            kind,
            configured: true,
            max_chunk: 4000,
            audio_prefix: audio_prefix.to_vec(),
            fail_at: None,
            voices: Ok(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Chunk number `index` (zero based) fails with `error`; earlier chunks succeed
    pub fn failing_at(kind: ProviderKind, index: usize, error: TtsProviderError) -> Self {
        Self {
            fail_at: Some((index, error)),
            ..Self::succeeding(kind, b"partial:")
        }
    }

    pub fn unconfigured(kind: ProviderKind) -> Self {
        Self {
            configured: false,
            ..Self::succeeding(kind, b"")
        }
    }

    pub fn with_max_chunk(mut self, max_chunk: usize) -> Self {
        self.max_chunk = max_chunk;
        self
    }

    pub fn with_voices(mut self, voices: Result<Vec<VoiceEntry>, TtsProviderError>) -> Self {
        self.voices = voices;
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn into_dyn(self) -> Arc<dyn TtsRepository> {
        Arc::new(self)
    }

    /// `(chunk text, voice id)` for every synthesis call received
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

pub fn as_dyn(provider: &Arc<MockProvider>) -> Arc<dyn TtsRepository> {
    provider.clone()
}

#[async_trait]
impl TtsRepository for MockProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn max_chunk_chars(&self) -> usize {
        self.max_chunk
    }

    async fn synthesize_chunk(
        &self,
        text: &str,
        voice_id: &str,
    ) -> Result<Vec<u8>, TtsProviderError> {
        if !self.configured {
            return Err(TtsProviderError::ProviderUnavailable(self.kind));
        }

        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((text.to_string(), voice_id.to_string()));
            calls.len() - 1
        };

        if let Some((fail_index, error)) = &self.fail_at {
            if *fail_index == index {
                return Err(error.clone());
            }
        }

        let mut audio = self.audio_prefix.clone();
        audio.extend_from_slice(text.as_bytes());
        Ok(audio)
    }

    async fn list_voices(&self) -> Result<Vec<VoiceEntry>, TtsProviderError> {
        self.voices.clone()
    }
}
