use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use pagetoplay_backend::domain::speech::{SpeechService, SpeechServiceApi};
use pagetoplay_backend::infrastructure::config::{Config, LogFormat};
use pagetoplay_backend::infrastructure::http::{create_app, start_http_server};
use pagetoplay_backend::infrastructure::repositories::ElevenLabsSpeechRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration. A missing API key stops the process here.
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting PageToPlay Backend on {}:{}",
        config.host,
        config.port
    );

    config.ensure_directories()?;
    tracing::info!(
        upload_dir = %config.upload_dir.display(),
        audio_dir = %config.audio_dir.display(),
        "Storage directories ready"
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    tracing::info!(base_url = %config.elevenlabs_base_url, "Initializing ElevenLabs client");
    let speech_repo = Arc::new(ElevenLabsSpeechRepository::new(
        config.elevenlabs_base_url.clone(),
        config.elevenlabs_api_key.clone(),
    ));

    // 2. Instantiate services
    let speech_service = Arc::new(SpeechService::new(speech_repo));

    // Warm the voice cache; the server still starts if this fails
    match speech_service.resolve_voices().await {
        Ok(voices) => tracing::info!(voice_count = voices.len(), "Voices fetched during startup"),
        Err(e) => tracing::warn!(
            error = %e,
            "Failed to fetch voices during startup, will retry on first use"
        ),
    }

    // 3. Build routes (controllers are wired inside)
    let app = create_app(&config, speech_service);

    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "pagetoplay_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "pagetoplay_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
