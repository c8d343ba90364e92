use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{AppError, AppResult};

pub struct AudioController {
    audio_dir: PathBuf,
}

/// Names that could escape the audio directory
fn is_traversal(file_name: &str) -> bool {
    file_name.starts_with('/')
        || file_name.starts_with('\\')
        || file_name.split(['/', '\\']).any(|segment| segment == "..")
}

fn content_type_for(file_name: &str) -> HeaderValue {
    if file_name.to_lowercase().ends_with(".mp3") {
        HeaderValue::from_static("audio/mpeg")
    } else {
        HeaderValue::from_static("application/octet-stream")
    }
}

impl AudioController {
    pub fn new(audio_dir: PathBuf) -> Self {
        Self { audio_dir }
    }

    /// GET /audio/*filename - Serve a generated audio file
    pub async fn serve(
        State(controller): State<Arc<AudioController>>,
        Path(file_name): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        tracing::debug!(file = %file_name, "Audio file requested");

        if file_name.is_empty() || is_traversal(&file_name) {
            tracing::warn!(file = %file_name, "Attempted directory traversal detected");
            return Err(AppError::Validation("Invalid filename".to_string()));
        }

        let path = controller.audio_dir.join(&file_name);
        let audio = match tokio::fs::read(&path).await {
            Ok(audio) => audio,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::NotFound("File not found".to_string()));
            }
            Err(e) => {
                return Err(AppError::Internal(format!(
                    "Error serving file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, content_type_for(&file_name));

        Ok((StatusCode::OK, headers, Body::from(audio)))
    }
}
