pub mod error;
pub mod model;
pub mod service;

pub use error::MeditationServiceError;
pub use model::Meditation;
pub use service::{MeditationService, MeditationServiceApi};

use serde::{Deserialize, Serialize};

/// Request for POST /api/meditations
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMeditationRequest {
    pub prompt: String,
}

/// Request for PATCH /api/meditations/:id/rate
#[derive(Debug, Serialize, Deserialize)]
pub struct RateMeditationRequest {
    pub rating: i32,
}

/// A freshly generated meditation with its estimated spoken length
#[derive(Debug, Serialize, Deserialize)]
pub struct MeditationResponse {
    #[serde(flatten)]
    pub meditation: Meditation,
    /// Seconds
    pub duration: u32,
}
