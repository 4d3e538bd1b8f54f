use super::provider_http::{
    build_http_client, classify_failure, failure_body, network_error, preview, read_audio,
};
use super::tts_repository::TtsRepository;
use crate::domain::speech::{ProviderKind, TtsProviderError, VoiceEntry};
use crate::infrastructure::config::TtsConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const QUOTA_MARKERS: &[&str] = &["quota_exceeded"];

#[derive(Debug, Serialize)]
struct SynthesisBody<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
    style: f32,
    use_speaker_boost: bool,
}

/// Settings tuned for slow, steady narration
const MEDITATION_VOICE_SETTINGS: VoiceSettings = VoiceSettings {
    stability: 0.75,
    similarity_boost: 0.75,
    style: 0.5,
    use_speaker_boost: true,
};

#[derive(Debug, Deserialize)]
struct VoicesPayload {
    voices: Vec<ElevenLabsVoice>,
}

#[derive(Debug, Deserialize)]
struct ElevenLabsVoice {
    voice_id: String,
    name: String,
}

/// ElevenLabs implementation of TTS repository
pub struct ElevenLabsTtsRepository {
    http_client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model_id: String,
    max_chunk_chars: usize,
}

impl ElevenLabsTtsRepository {
    pub fn new(config: &TtsConfig) -> Self {
        Self {
            http_client: build_http_client(ProviderKind::ElevenLabs, config.request_timeout()),
            api_key: config.elevenlabs_api_key.clone(),
            base_url: config.elevenlabs_base_url.trim_end_matches('/').to_string(),
            model_id: config.elevenlabs_model_id.clone(),
            max_chunk_chars: config.elevenlabs_chunk_size,
        }
    }

    fn api_key(&self) -> Result<&str, TtsProviderError> {
        self.api_key
            .as_deref()
            .ok_or(TtsProviderError::ProviderUnavailable(ProviderKind::ElevenLabs))
    }
}

#[async_trait]
impl TtsRepository for ElevenLabsTtsRepository {
    fn kind(&self) -> ProviderKind {
        ProviderKind::ElevenLabs
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
        let api_key = self.api_key()?;
        let url = format!(
            "{}/v1/text-to-speech/{}",
            self.base_url,
            urlencoding::encode(voice_id)
        );

        tracing::info!(
            provider = "elevenlabs",
            model = %self.model_id,
            voice = voice_id,
            text_length = text.len(),
            text_preview = preview(text),
            "Calling ElevenLabs text-to-speech API"
        );

        let response = self
            .http_client
            .post(&url)
            .header("xi-api-key", api_key)
            .header("Accept", "audio/mpeg")
            .json(&SynthesisBody {
                text,
                model_id: &self.model_id,
                voice_settings: MEDITATION_VOICE_SETTINGS,
            })
            .send()
            .await
            .map_err(|e| network_error(ProviderKind::ElevenLabs, e))?;

        let audio = read_audio(ProviderKind::ElevenLabs, response, QUOTA_MARKERS).await?;
        tracing::debug!(audio_size = audio.len(), "ElevenLabs audio received");

        Ok(audio)
    }

    async fn list_voices(&self) -> Result<Vec<VoiceEntry>, TtsProviderError> {
        let api_key = self.api_key()?;

        let response = self
            .http_client
            .get(format!("{}/v1/voices", self.base_url))
            .header("xi-api-key", api_key)
            .send()
            .await
            .map_err(|e| network_error(ProviderKind::ElevenLabs, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = failure_body(ProviderKind::ElevenLabs, response).await;
            return Err(classify_failure(ProviderKind::ElevenLabs, status, body, QUOTA_MARKERS));
        }

        let payload: VoicesPayload =
            response
                .json()
                .await
                .map_err(|e| TtsProviderError::ProviderError {
                    provider: ProviderKind::ElevenLabs,
                    status: status.as_u16(),
                    message: format!("unexpected voices payload: {}", e),
                })?;

        Ok(payload
            .voices
            .into_iter()
            .map(|voice| VoiceEntry::new(voice.voice_id, voice.name))
            .collect())
    }
}
