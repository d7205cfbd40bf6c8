use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tts_studio_backend::controllers::{history::HistoryController, speech::SpeechController};
use tts_studio_backend::domain::history::{spawn_retention_task, HistoryService, HistoryServiceApi};
use tts_studio_backend::domain::tts::TtsService;
use tts_studio_backend::infrastructure::config::{Config, LogFormat};
use tts_studio_backend::infrastructure::http::{build_router, start_http_server};
use tts_studio_backend::infrastructure::oauth::GoogleCredentials;
use tts_studio_backend::infrastructure::repositories::{
    GoogleTtsRepository, HistoryRepository, TtsRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting TTS Studio Backend on {}:{}",
        config.host,
        config.port
    );

    // History directory, created on first start
    let history_repo = Arc::new(HistoryRepository::new(&config.history_dir).await?);
    tracing::info!(dir = %history_repo.dir().display(), "History directory ready");

    let history_service = Arc::new(HistoryService::new(
        history_repo.clone(),
        config.history_retention()?,
    ));

    // Expired audio is removed once before serving, then periodically
    if let Err(e) = history_service.sweep().await {
        tracing::warn!(error = %e, "Startup history cleanup failed");
    }
    spawn_retention_task(
        history_service.clone(),
        Duration::from_secs(config.history_sweep_interval_secs),
    );

    // Google Text-to-Speech client
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.tts_timeout_secs))
        .build()?;
    let credentials = GoogleCredentials::load(
        config.google_api_key.as_deref(),
        &config.google_credentials_path,
        http_client.clone(),
    )?;
    let tts_repo: Arc<dyn TtsRepository> = Arc::new(GoogleTtsRepository::new(
        http_client,
        config.google_tts_endpoint.clone(),
        credentials,
    ));
    tracing::info!(endpoint = %config.google_tts_endpoint, "Google TTS client initialized");

    // Services and controllers
    let tts_service = Arc::new(TtsService::new(tts_repo, history_repo));
    let speech_controller = Arc::new(SpeechController::new(tts_service));
    let history_controller = Arc::new(HistoryController::new(history_service.clone()));

    let app = build_router(
        &config.index_page(),
        speech_controller,
        history_controller,
        history_service,
    );

    start_http_server(Arc::new(config), app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "tts_studio_backend=debug,tower_http=debug"
    } else {
        "tts_studio_backend=info,tower_http=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
