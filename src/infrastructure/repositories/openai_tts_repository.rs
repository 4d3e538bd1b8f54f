use super::provider_http::{build_http_client, network_error, preview, read_audio, SpeechRequestBody};
use super::tts_repository::TtsRepository;
use crate::domain::speech::{ProviderKind, TtsProviderError, VoiceEntry};
use crate::infrastructure::config::TtsConfig;
use async_trait::async_trait;

const QUOTA_MARKERS: &[&str] = &["insufficient_quota", "rate_limit_exceeded"];

const OPENAI_VOICES: &[(&str, &str)] = &[
    ("alloy", "Alloy"),
    ("echo", "Echo"),
    ("fable", "Fable"),
    ("onyx", "Onyx"),
    ("nova", "Nova"),
    ("shimmer", "Shimmer"),
];

/// OpenAI TTS implementation of TTS repository
pub struct OpenAiTtsRepository {
    http_client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    max_chunk_chars: usize,
}

impl OpenAiTtsRepository {
    pub fn new(config: &TtsConfig) -> Self {
        Self {
            http_client: build_http_client(ProviderKind::OpenAi, config.request_timeout()),
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
            max_chunk_chars: config.openai_chunk_size,
        }
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
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
            .ok_or(TtsProviderError::ProviderUnavailable(ProviderKind::OpenAi))?;

        tracing::info!(
            provider = "openai",
            model = %self.model,
            voice = voice_id,
            text_length = text.len(),
            text_preview = preview(text),
            "Calling OpenAI TTS API"
        );

        let response = self
            .http_client
            .post(format!("{}/v1/audio/speech", self.base_url))
            .bearer_auth(api_key)
            .json(&SpeechRequestBody {
                model: &self.model,
                input: text,
                voice: voice_id,
                response_format: "mp3",
            })
            .send()
            .await
            .map_err(|e| network_error(ProviderKind::OpenAi, e))?;

        let audio = read_audio(ProviderKind::OpenAi, response, QUOTA_MARKERS).await?;
        tracing::debug!(audio_size = audio.len(), "OpenAI audio received");

        Ok(audio)
    }

    async fn list_voices(&self) -> Result<Vec<VoiceEntry>, TtsProviderError> {
        if !self.is_configured() {
            return Err(TtsProviderError::ProviderUnavailable(ProviderKind::OpenAi));
        }

        Ok(OPENAI_VOICES
            .iter()
            .map(|(id, name)| VoiceEntry::new(*id, *name))
            .collect())
    }
}
