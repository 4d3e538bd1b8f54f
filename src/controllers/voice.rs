use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::speech::{SpeechService, SpeechServiceApi, VoicesResponse};

pub struct VoiceController {
    speech_service: Arc<SpeechService>,
}

impl VoiceController {
    pub fn new(speech_service: Arc<SpeechService>) -> Self {
        Self { speech_service }
    }

    /// GET /api/voices - Voices across every configured provider
    pub async fn list_voices(State(controller): State<Arc<VoiceController>>) -> Json<VoicesResponse> {
        let voices = controller.speech_service.list_voices().await;
        Json(VoicesResponse { voices })
    }
}
