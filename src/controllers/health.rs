use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::speech::{SpeechService, SpeechServiceApi};

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Reports whether the voice list is warm. Never calls the provider.
pub async fn health_ready(State(speech_service): State<Arc<SpeechService>>) -> impl IntoResponse {
    let voices = if speech_service.has_cached_voices().await {
        "cached"
    } else {
        "cold"
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "voices": voices,
        })),
    )
}
