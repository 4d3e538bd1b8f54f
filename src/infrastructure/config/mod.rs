use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub tts: TtsConfig,
    pub generation: GenerationConfig,
}

/// Credentials and tuning for the text-to-speech providers.
///
/// A provider takes part in synthesis and voice listing only when its API key is set.
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_base_url: String,
    pub elevenlabs_model_id: String,
    pub elevenlabs_chunk_size: usize,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_chunk_size: usize,
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub groq_model: String,
    pub groq_chunk_size: usize,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub chat_model: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            elevenlabs_api_key: None,
            elevenlabs_base_url: "https://api.elevenlabs.io".to_string(),
            elevenlabs_model_id: "eleven_multilingual_v2".to_string(),
            elevenlabs_chunk_size: 500,
            openai_api_key: None,
            openai_base_url: "https://api.openai.com".to_string(),
            openai_model: "tts-1".to_string(),
            openai_chunk_size: 4000,
            groq_api_key: None,
            groq_base_url: "https://api.groq.com".to_string(),
            groq_model: "playai-tts".to_string(),
            groq_chunk_size: 1000,
            request_timeout_secs: 20,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            groq_api_key: None,
            groq_base_url: "https://api.groq.com".to_string(),
            chat_model: "llama3-8b-8192".to_string(),
        }
    }
}

impl TtsConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let tts_defaults = TtsConfig::default();
        let generation_defaults = GenerationConfig::default();
        let groq_api_key = optional_var("GROQ_API_KEY");
        let groq_base_url = env::var("GROQ_BASE_URL").unwrap_or(tts_defaults.groq_base_url);

        let tts = TtsConfig {
            elevenlabs_api_key: optional_var("ELEVENLABS_API_KEY"),
            elevenlabs_base_url: env::var("ELEVENLABS_BASE_URL")
                .unwrap_or(tts_defaults.elevenlabs_base_url),
            elevenlabs_model_id: env::var("ELEVENLABS_MODEL_ID")
                .unwrap_or(tts_defaults.elevenlabs_model_id),
            elevenlabs_chunk_size: parse_var(
                "ELEVENLABS_CHUNK_SIZE",
                tts_defaults.elevenlabs_chunk_size,
            )?,
            openai_api_key: optional_var("OPENAI_API_KEY"),
            openai_base_url: env::var("OPENAI_BASE_URL").unwrap_or(tts_defaults.openai_base_url),
            openai_model: env::var("OPENAI_TTS_MODEL").unwrap_or(tts_defaults.openai_model),
            openai_chunk_size: parse_var("OPENAI_CHUNK_SIZE", tts_defaults.openai_chunk_size)?,
            groq_api_key: groq_api_key.clone(),
            groq_base_url: groq_base_url.clone(),
            groq_model: env::var("GROQ_TTS_MODEL").unwrap_or(tts_defaults.groq_model),
            groq_chunk_size: parse_var("GROQ_CHUNK_SIZE", tts_defaults.groq_chunk_size)?,
            request_timeout_secs: parse_var(
                "TTS_REQUEST_TIMEOUT_SECS",
                tts_defaults.request_timeout_secs,
            )?,
        };

        let generation = GenerationConfig {
            groq_api_key,
            groq_base_url,
            chat_model: env::var("GROQ_CHAT_MODEL").unwrap_or(generation_defaults.chat_model),
        };

        let config = Config {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            tts,
            generation,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

/// Blank values count as unset so an empty `KEY=` line does not enable a provider
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(name: &str, default: T) -> Result<T, Box<dyn std::error::Error>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + 'static,
{
    match env::var(name) {
        Ok(raw) => Ok(raw.trim().parse()?),
        Err(_) => Ok(default),
    }
}
