pub mod request_id;

use axum::{
    middleware,
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{
    health::HealthController, meditation::MeditationController, voice::VoiceController,
};
use crate::infrastructure::config::Config;
pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Controllers wired into the router
pub struct AppControllers {
    pub health: Arc<HealthController>,
    pub voice: Arc<VoiceController>,
    pub meditation: Arc<MeditationController>,
}

/// Build the application router with every route and middleware layer
pub fn build_router(controllers: AppControllers) -> Router {
    let health_routes = Router::new()
        .route("/health", get(HealthController::health))
        .route("/health/ready", get(HealthController::health_ready))
        .with_state(controllers.health);

    let voice_routes = Router::new()
        .route("/api/voices", get(VoiceController::list_voices))
        .with_state(controllers.voice);

    let meditation_routes = Router::new()
        .route(
            "/api/meditations",
            get(MeditationController::list_meditations).post(MeditationController::create_meditation),
        )
        .route(
            "/api/meditations/:id",
            get(MeditationController::get_meditation).delete(MeditationController::delete_meditation),
        )
        .route("/api/meditations/:id/rate", patch(MeditationController::rate_meditation))
        .route("/api/meditations/:id/audio", get(MeditationController::stream_audio))
        .with_state(controllers.meditation);

    Router::new()
        .merge(health_routes)
        .merge(voice_routes)
        .merge(meditation_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    controllers: AppControllers,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(controllers);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
