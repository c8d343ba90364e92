use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use crate::controllers::{
    audio::AudioController, document::DocumentController, health, page::PageController,
};
use crate::domain::speech::SpeechService;
use crate::infrastructure::config::Config;

/// Build the application router with all routes configured
pub fn create_app(config: &Config, speech_service: Arc<SpeechService>) -> Router {
    let page_controller = Arc::new(PageController::new(speech_service.clone()));
    let document_controller = Arc::new(DocumentController::new(
        speech_service.clone(),
        config.upload_dir.clone(),
        config.audio_dir.clone(),
    ));
    let audio_controller = Arc::new(AudioController::new(config.audio_dir.clone()));

    // Upload form
    let page_routes = Router::new()
        .route("/", get(PageController::index))
        .with_state(page_controller);

    // Document processing (multipart uploads)
    let document_routes = Router::new()
        .route("/process", axum::routing::post(DocumentController::process))
        .with_state(document_controller)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));

    // Generated audio
    let audio_routes = Router::new()
        .route("/audio/*filename", get(AudioController::serve))
        .with_state(audio_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(speech_service)
        .merge(page_routes)
        .merge(document_routes)
        .merge(audio_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
