use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::{
    domain::{
        meditation::{
            CreateMeditationRequest, Meditation, MeditationResponse, MeditationService,
            MeditationServiceApi, RateMeditationRequest,
        },
        speech::{SpeechService, SpeechServiceApi, SynthesisRequest},
    },
    error::{AppError, AppResult},
};

pub const X_TTS_PROVIDER: &str = "x-tts-provider";

#[derive(Debug, Deserialize)]
pub struct AudioQuery {
    pub voice_id: Option<String>,
}

pub struct MeditationController {
    meditation_service: Arc<MeditationService>,
    speech_service: Arc<SpeechService>,
}

impl MeditationController {
    pub fn new(
        meditation_service: Arc<MeditationService>,
        speech_service: Arc<SpeechService>,
    ) -> Self {
        Self {
            meditation_service,
            speech_service,
        }
    }

    /// POST /api/meditations - Generate and store a meditation
    pub async fn create_meditation(
        State(controller): State<Arc<MeditationController>>,
        request: Result<Json<CreateMeditationRequest>, JsonRejection>,
    ) -> AppResult<Json<MeditationResponse>> {
        let Json(request) = request?;
        let meditation = controller
            .meditation_service
            .create_meditation(request)
            .await?;
        Ok(Json(meditation))
    }

    /// GET /api/meditations - List meditations, oldest first
    pub async fn list_meditations(
        State(controller): State<Arc<MeditationController>>,
    ) -> AppResult<Json<Vec<Meditation>>> {
        let meditations = controller.meditation_service.list_meditations().await?;
        Ok(Json(meditations))
    }

    /// GET /api/meditations/{id}
    pub async fn get_meditation(
        State(controller): State<Arc<MeditationController>>,
        Path(id): Path<String>,
    ) -> AppResult<Json<Meditation>> {
        let id = parse_id(&id)?;
        let meditation = controller.meditation_service.get_meditation(id).await?;
        Ok(Json(meditation))
    }

    /// PATCH /api/meditations/{id}/rate
    pub async fn rate_meditation(
        State(controller): State<Arc<MeditationController>>,
        Path(id): Path<String>,
        request: Result<Json<RateMeditationRequest>, JsonRejection>,
    ) -> AppResult<Json<Meditation>> {
        let id = parse_id(&id)?;
        let Json(request) = request?;
        let meditation = controller
            .meditation_service
            .rate_meditation(id, request)
            .await?;
        Ok(Json(meditation))
    }

    /// DELETE /api/meditations/{id}
    pub async fn delete_meditation(
        State(controller): State<Arc<MeditationController>>,
        Path(id): Path<String>,
    ) -> AppResult<StatusCode> {
        let id = parse_id(&id)?;
        controller.meditation_service.delete_meditation(id).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// GET /api/meditations/{id}/audio?voice_id= - Narrate a stored meditation as MP3
    pub async fn stream_audio(
        State(controller): State<Arc<MeditationController>>,
        Path(id): Path<String>,
        query: Result<Query<AudioQuery>, QueryRejection>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let id = parse_id(&id)?;
        let Query(query) = query?;
        let voice_selector = query
            .voice_id
            .filter(|voice| !voice.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("Voice ID is required".to_string()))?;

        let meditation = controller.meditation_service.get_meditation(id).await?;

        // Fires if the client goes away before synthesis finishes
        let cancel = CancellationToken::new();
        let _cancel_on_drop = cancel.clone().drop_guard();

        let result = controller
            .speech_service
            .synthesize(
                SynthesisRequest {
                    text: meditation.content,
                    voice_selector,
                },
                cancel,
            )
            .await?;

        tracing::info!(
            meditation_id = id,
            provider = %result.provider,
            voice = %result.voice_id,
            chunks = result.chunk_count,
            audio_size = result.audio_data.len(),
            "Meditation audio ready"
        );

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(result.audio_data.len()));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(header::CONTENT_DISPOSITION, HeaderValue::from_static("inline"));
        headers.insert(X_TTS_PROVIDER, HeaderValue::from_static(result.provider.as_str()));

        Ok((StatusCode::OK, headers, Body::from(result.audio_data)))
    }
}

fn parse_id(raw: &str) -> AppResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest("Invalid ID".to_string()))
}
