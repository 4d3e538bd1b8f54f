use super::error::MeditationServiceError;
use crate::domain::meditation::{
    CreateMeditationRequest, Meditation, MeditationResponse, RateMeditationRequest,
};
use crate::infrastructure::repositories::{MeditationGenerator, MeditationRepository};
use async_trait::async_trait;
use std::sync::Arc;

const MIN_RATING: i32 = 1;
const MAX_RATING: i32 = 5;

pub struct MeditationService {
    meditation_repo: Arc<dyn MeditationRepository>,
    generator: Arc<dyn MeditationGenerator>,
}

impl MeditationService {
    pub fn new(
        meditation_repo: Arc<dyn MeditationRepository>,
        generator: Arc<dyn MeditationGenerator>,
    ) -> Self {
        Self {
            meditation_repo,
            generator,
        }
    }
}

#[async_trait]
pub trait MeditationServiceApi: Send + Sync {
    /// Generate a script for the prompt and store it
    async fn create_meditation(
        &self,
        request: CreateMeditationRequest,
    ) -> Result<MeditationResponse, MeditationServiceError>;

    async fn list_meditations(&self) -> Result<Vec<Meditation>, MeditationServiceError>;

    async fn get_meditation(&self, id: i32) -> Result<Meditation, MeditationServiceError>;

    async fn rate_meditation(
        &self,
        id: i32,
        request: RateMeditationRequest,
    ) -> Result<Meditation, MeditationServiceError>;

    /// Deleting an unknown id succeeds
    async fn delete_meditation(&self, id: i32) -> Result<(), MeditationServiceError>;

    async fn is_store_reachable(&self) -> bool;
}

#[async_trait]
impl MeditationServiceApi for MeditationService {
    async fn create_meditation(
        &self,
        request: CreateMeditationRequest,
    ) -> Result<MeditationResponse, MeditationServiceError> {
        let prompt = request.prompt.trim();
        if prompt.is_empty() {
            return Err(MeditationServiceError::Invalid(
                "Please enter a meditation prompt".to_string(),
            ));
        }

        tracing::info!(prompt_length = prompt.len(), "Creating meditation");

        let generated = self.generator.generate(prompt).await?;
        let meditation = self
            .meditation_repo
            .create(prompt, &generated.content)
            .await
            .map_err(|e| MeditationServiceError::Dependency(e.to_string()))?;

        tracing::info!(
            meditation_id = meditation.id,
            duration_seconds = generated.duration_seconds,
            "Meditation stored"
        );

        Ok(MeditationResponse {
            meditation,
            duration: generated.duration_seconds,
        })
    }

    async fn list_meditations(&self) -> Result<Vec<Meditation>, MeditationServiceError> {
        self.meditation_repo
            .list()
            .await
            .map_err(|e| MeditationServiceError::Dependency(e.to_string()))
    }

    async fn get_meditation(&self, id: i32) -> Result<Meditation, MeditationServiceError> {
        self.meditation_repo
            .find_by_id(id)
            .await
            .map_err(|e| MeditationServiceError::Dependency(e.to_string()))?
            .ok_or(MeditationServiceError::NotFound)
    }

    async fn rate_meditation(
        &self,
        id: i32,
        request: RateMeditationRequest,
    ) -> Result<Meditation, MeditationServiceError> {
        if !(MIN_RATING..=MAX_RATING).contains(&request.rating) {
            return Err(MeditationServiceError::Invalid(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        self.meditation_repo
            .rate(id, request.rating)
            .await
            .map_err(|e| MeditationServiceError::Dependency(e.to_string()))?
            .ok_or(MeditationServiceError::NotFound)
    }

    async fn delete_meditation(&self, id: i32) -> Result<(), MeditationServiceError> {
        let removed = self
            .meditation_repo
            .delete(id)
            .await
            .map_err(|e| MeditationServiceError::Dependency(e.to_string()))?;

        if !removed {
            tracing::debug!(meditation_id = id, "Delete of unknown meditation ignored");
        }
        Ok(())
    }

    async fn is_store_reachable(&self) -> bool {
        match self.meditation_repo.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Meditation store is unreachable");
                false
            }
        }
    }
}
