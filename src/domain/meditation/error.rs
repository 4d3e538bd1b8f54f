use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum MeditationServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("{0}")]
    Invalid(String),
    #[error("meditation not found")]
    NotFound,
    #[error("generation failed: {0}")]
    Generation(String),
}

impl From<AppError> for MeditationServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => MeditationServiceError::Invalid(msg),
            AppError::NotFound(_) => MeditationServiceError::NotFound,
            AppError::ExternalService(msg) => MeditationServiceError::Generation(msg),
            _ => MeditationServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<MeditationServiceError> for AppError {
    fn from(err: MeditationServiceError) -> Self {
        match err {
            MeditationServiceError::Invalid(msg) => AppError::BadRequest(msg),
            MeditationServiceError::NotFound => {
                AppError::NotFound("Meditation not found".to_string())
            }
            MeditationServiceError::Generation(msg) => {
                AppError::ExternalService(format!("Failed to generate meditation: {}", msg))
            }
            MeditationServiceError::Dependency(msg) => AppError::Internal(msg),
        }
    }
}
