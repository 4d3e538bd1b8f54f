use meditation_backend::controllers::{
    health::HealthController, meditation::MeditationController, voice::VoiceController,
};
use meditation_backend::domain::meditation::MeditationService;
use meditation_backend::domain::speech::{SpeechService, TtsProviderRegistry};
use meditation_backend::infrastructure::config::{Config, LogFormat};
use meditation_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use meditation_backend::infrastructure::http::{start_http_server, AppControllers};
use meditation_backend::infrastructure::repositories::{
    ElevenLabsTtsRepository, GroqMeditationGenerator, GroqTtsRepository, MeditationGenerator,
    MeditationRepository, OpenAiTtsRepository, PgMeditationRepository, TtsRepository,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Meditation Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject db pool and provider credentials)
    tracing::info!("Instantiating repositories...");
    let meditation_repo: Arc<dyn MeditationRepository> =
        Arc::new(PgMeditationRepository::new(pool.clone()));
    let generator: Arc<dyn MeditationGenerator> =
        Arc::new(GroqMeditationGenerator::new(&config.generation));
    let tts_providers: Vec<Arc<dyn TtsRepository>> = vec![
        Arc::new(ElevenLabsTtsRepository::new(&config.tts)),
        Arc::new(OpenAiTtsRepository::new(&config.tts)),
        Arc::new(GroqTtsRepository::new(&config.tts)),
    ];

    let registry = Arc::new(TtsProviderRegistry::new(tts_providers));
    let configured = registry.configured_kinds();
    if configured.is_empty() {
        tracing::warn!("No text-to-speech provider is configured, audio requests will fail");
    } else {
        tracing::info!(providers = ?configured, "Text-to-speech providers configured");
    }

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let meditation_service = Arc::new(MeditationService::new(meditation_repo, generator));
    let speech_service = Arc::new(SpeechService::new(registry));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let controllers = AppControllers {
        health: Arc::new(HealthController::new(
            meditation_service.clone(),
            speech_service.clone(),
        )),
        voice: Arc::new(VoiceController::new(speech_service.clone())),
        meditation: Arc::new(MeditationController::new(meditation_service, speech_service)),
    };

    // Start HTTP server with all routes
    start_http_server(config, controllers).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "meditation_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
