use super::provider_http::{build_http_client, network_error, preview, read_audio, SpeechRequestBody};
use super::tts_repository::TtsRepository;
use crate::domain::speech::{ProviderKind, TtsProviderError, VoiceEntry};
use crate::infrastructure::config::TtsConfig;
use async_trait::async_trait;

const QUOTA_MARKERS: &[&str] = &["rate_limit_exceeded", "quota"];

const PLAYAI_VOICES: &[&str] = &[
    "Arista-PlayAI",
    "Atlas-PlayAI",
    "Basil-PlayAI",
    "Briggs-PlayAI",
    "Calum-PlayAI",
    "Celeste-PlayAI",
    "Cheyenne-PlayAI",
    "Chip-PlayAI",
    "Cillian-PlayAI",
    "Deedee-PlayAI",
    "Fritz-PlayAI",
    "Gail-PlayAI",
    "Indigo-PlayAI",
    "Mamaw-PlayAI",
    "Mason-PlayAI",
    "Mikail-PlayAI",
    "Mitch-PlayAI",
    "Quinn-PlayAI",
    "Thunder-PlayAI",
];

/// Groq PlayAI speech, served on Groq's OpenAI-compatible API
pub struct GroqTtsRepository {
    http_client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    max_chunk_chars: usize,
}

impl GroqTtsRepository {
    pub fn new(config: &TtsConfig) -> Self {
        Self {
            http_client: build_http_client(ProviderKind::Groq, config.request_timeout()),
            api_key: config.groq_api_key.clone(),
            base_url: config.groq_base_url.trim_end_matches('/').to_string(),
            model: config.groq_model.clone(),
            max_chunk_chars: config.groq_chunk_size,
        }
    }
}

#[async_trait]
impl TtsRepository for GroqTtsRepository {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Groq
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn max_chunk_chars(&self) -> usize {
        self.max_chunk_chars
    }

    async fn synthesize_chunk(
        &self,
        text: &str,
        voice_id: &str,
    ) -> Result<Vec<u8>, TtsProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(TtsProviderError::ProviderUnavailable(ProviderKind::Groq))?;

        tracing::info!(
            provider = "groq",
            model = %self.model,
            voice = voice_id,
            text_length = text.len(),
            text_preview = preview(text),
            "Calling Groq speech API"
        );

        let response = self
            .http_client
            .post(format!("{}/openai/v1/audio/speech", self.base_url))
            .bearer_auth(api_key)
            .json(&SpeechRequestBody {
                model: &self.model,
                input: text,
                voice: voice_id,
                response_format: "mp3",
            })
            .send()
            .await
            .map_err(|e| network_error(ProviderKind::Groq, e))?;

        read_audio(ProviderKind::Groq, response, QUOTA_MARKERS).await
    }

    async fn list_voices(&self) -> Result<Vec<VoiceEntry>, TtsProviderError> {
        if !self.is_configured() {
            return Err(TtsProviderError::ProviderUnavailable(ProviderKind::Groq));
        }

        Ok(PLAYAI_VOICES
            .iter()
            .map(|id| VoiceEntry::new(*id, id.trim_end_matches("-PlayAI")))
            .collect())
    }
}
