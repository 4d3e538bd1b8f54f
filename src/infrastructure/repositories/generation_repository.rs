use crate::error::AppResult;
use async_trait::async_trait;

/// Script returned by a text-generation provider
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMeditation {
    pub content: String,
    pub duration_seconds: u32,
}

/// Turns a user prompt into a guided meditation script
#[async_trait]
pub trait MeditationGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<GeneratedMeditation>;
}

const WORDS_PER_MINUTE: f64 = 150.0;

/// Spoken length in seconds at a steady narration pace
pub fn estimate_duration_seconds(text: &str) -> u32 {
    let words = text.split_whitespace().count();
    if words == 0 {
        return 0;
    }
    (words as f64 / WORDS_PER_MINUTE * 60.0).ceil() as u32
}
