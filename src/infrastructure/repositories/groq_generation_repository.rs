use super::generation_repository::{estimate_duration_seconds, GeneratedMeditation, MeditationGenerator};
use crate::error::{AppError, AppResult};
use crate::infrastructure::config::GenerationConfig;
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that generates guided meditation scripts. \
The script should be calm, soothing, and follow the user's prompt. \
Focus on mindfulness and relaxation techniques. \
Keep the script concise and suitable for the estimated duration based on word count (approx 150 words per minute).";

pub const UNAVAILABLE_PLACEHOLDER: &str = "Meditation generation is currently unavailable.";

/// Meditation scripts from Groq chat completions, through its OpenAI-compatible API
pub struct GroqMeditationGenerator {
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl GroqMeditationGenerator {
    pub fn new(config: &GenerationConfig) -> Self {
        let client = config.groq_api_key.as_ref().map(|api_key| {
            let openai_config = OpenAIConfig::new()
                .with_api_key(api_key)
                .with_api_base(format!(
                    "{}/openai/v1",
                    config.groq_base_url.trim_end_matches('/')
                ));
            Client::with_config(openai_config)
        });

        if client.is_none() {
            tracing::warn!("GROQ_API_KEY not set, meditation generation returns a placeholder");
        }

        Self {
            client,
            model: config.chat_model.clone(),
        }
    }
}

fn generation_error(err: OpenAIError) -> AppError {
    AppError::ExternalService(err.to_string())
}

#[async_trait]
impl MeditationGenerator for GroqMeditationGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<GeneratedMeditation> {
        let Some(client) = &self.client else {
            return Ok(GeneratedMeditation {
                content: UNAVAILABLE_PLACEHOLDER.to_string(),
                duration_seconds: 0,
            });
        };

        tracing::info!(
            model = %self.model,
            prompt_length = prompt.len(),
            "Generating meditation script"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(0.7)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_PROMPT)
                    .build()
                    .map_err(generation_error)?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()
                    .map_err(generation_error)?
                    .into(),
            ])
            .build()
            .map_err(generation_error)?;

        let response = client.chat().create(request).await.map_err(|e| {
            tracing::error!(error = %e, "Groq chat completion failed");
            generation_error(e)
        })?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                AppError::ExternalService("model returned no meditation content".to_string())
            })?;

        let duration_seconds = estimate_duration_seconds(&content);
        tracing::info!(
            content_length = content.len(),
            duration_seconds,
            "Meditation script generated"
        );

        Ok(GeneratedMeditation {
            content,
            duration_seconds,
        })
    }
}
