use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::meditation::{MeditationService, MeditationServiceApi};
use crate::domain::speech::SpeechService;

pub struct HealthController {
    meditation_service: Arc<MeditationService>,
    speech_service: Arc<SpeechService>,
}

impl HealthController {
    pub fn new(
        meditation_service: Arc<MeditationService>,
        speech_service: Arc<SpeechService>,
    ) -> Self {
        Self {
            meditation_service,
            speech_service,
        }
    }

    pub async fn health() -> impl IntoResponse {
        (StatusCode::OK, "OK")
    }

    pub async fn health_ready(State(controller): State<Arc<HealthController>>) -> impl IntoResponse {
        let providers: Vec<&'static str> = controller
            .speech_service
            .registry()
            .configured_kinds()
            .into_iter()
            .map(|kind| kind.as_str())
            .collect();

        if controller.meditation_service.is_store_reachable().await {
            (
                StatusCode::OK,
                Json(json!({
                    "status": "ready",
                    "database": "connected",
                    "tts_providers": providers
                })),
            )
        } else {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "database": "disconnected",
                    "tts_providers": providers
                })),
            )
        }
    }
}
