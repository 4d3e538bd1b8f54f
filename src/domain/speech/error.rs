use super::provider::ProviderKind;
use crate::error::AppError;

/// Failure of a single provider call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TtsProviderError {
    #[error("{0} is not configured (missing API key)")]
    ProviderUnavailable(ProviderKind),
    #[error("{provider} quota exceeded: {message}")]
    QuotaExceeded {
        provider: ProviderKind,
        message: String,
    },
    #[error("{provider} API error ({status}): {message}")]
    ProviderError {
        provider: ProviderKind,
        status: u16,
        message: String,
    },
    #[error("{provider} network error: {message}")]
    NetworkError {
        provider: ProviderKind,
        message: String,
    },
}

impl TtsProviderError {
    pub fn provider(&self) -> ProviderKind {
        match self {
            TtsProviderError::ProviderUnavailable(provider) => *provider,
            TtsProviderError::QuotaExceeded { provider, .. }
            | TtsProviderError::ProviderError { provider, .. }
            | TtsProviderError::NetworkError { provider, .. } => *provider,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("all text-to-speech providers failed: {detail}")]
    AllProvidersExhausted { detail: String },
    #[error("Meditation has no speakable content")]
    EmptyText,
    #[error("synthesis cancelled")]
    Cancelled,
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::EmptyText => AppError::BadRequest(err.to_string()),
            SpeechServiceError::AllProvidersExhausted { detail } => {
                AppError::ExternalService(format!("Failed to generate audio: {}", detail))
            }
            SpeechServiceError::Cancelled => AppError::Internal(err.to_string()),
        }
    }
}
