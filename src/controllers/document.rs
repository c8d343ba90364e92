use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, State},
    Extension, Json,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::{
    domain::{
        document::{extract_text, file_names, ProcessResponse, TempUpload},
        speech::{SpeechService, SpeechServiceApi},
    },
    error::{AppError, AppResult},
    infrastructure::http::RequestId,
};

pub const FILE_FIELD: &str = "pdf_file";
pub const VOICE_FIELD: &str = "voice";
pub const STABILITY_FIELD: &str = "stability";
const DEFAULT_STABILITY: &str = "0.7";

/// A file field as received, before validation
struct UploadedFile {
    file_name: Option<String>,
    bytes: Bytes,
}

/// Raw multipart form for POST /process
#[derive(Default)]
struct ProcessForm {
    file: Option<UploadedFile>,
    voice: Option<String>,
    stability: Option<String>,
}

impl ProcessForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = ProcessForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some(FILE_FIELD) => {
                    let file_name = field.file_name().map(str::to_string);
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    form.file = Some(UploadedFile { file_name, bytes });
                }
                Some(VOICE_FIELD) => form.voice = Some(field.text().await.map_err(multipart_error)?),
                Some(STABILITY_FIELD) => {
                    form.stability = Some(field.text().await.map_err(multipart_error)?)
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    AppError::Validation(format!("Could not read the uploaded form: {}", err.body_text()))
}

/// Parse a stability value; absent means the default
fn parse_stability(raw: Option<&str>) -> AppResult<f64> {
    let raw = raw.unwrap_or(DEFAULT_STABILITY);
    let stability: f64 = raw.trim().parse().map_err(|_| {
        tracing::warn!(stability = raw, "Invalid stability value");
        AppError::Validation("Invalid numeric value provided for Stability.".to_string())
    })?;

    if !(0.0..=1.0).contains(&stability) {
        return Err(AppError::Validation(
            "Stability value must be between 0.0 and 1.0.".to_string(),
        ));
    }

    Ok(stability)
}

pub struct DocumentController {
    speech_service: Arc<SpeechService>,
    upload_dir: PathBuf,
    audio_dir: PathBuf,
}

impl DocumentController {
    pub fn new(speech_service: Arc<SpeechService>, upload_dir: PathBuf, audio_dir: PathBuf) -> Self {
        Self {
            speech_service,
            upload_dir,
            audio_dir,
        }
    }

    /// POST /process - Convert an uploaded PDF to an MP3
    pub async fn process(
        State(controller): State<Arc<DocumentController>>,
        Extension(request_id): Extension<RequestId>,
        multipart: Multipart,
    ) -> AppResult<Json<ProcessResponse>> {
        let start_time = Instant::now();
        let form = ProcessForm::read(multipart).await?;

        let file = form
            .file
            .ok_or_else(|| AppError::Validation("No file part in the request.".to_string()))?;
        let original_name = file
            .file_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                AppError::Validation("No file selected or filename is empty.".to_string())
            })?;

        if !file_names::is_supported(&original_name) {
            return Err(AppError::Validation(format!(
                "Invalid file type. Please upload a supported file (.{}).",
                file_names::SUPPORTED_EXTENSION
            )));
        }

        // Removed when this guard goes out of scope, whatever happens below
        let upload = TempUpload::persist(&controller.upload_dir, &original_name, &file.bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to stage upload: {}", e)))?;

        let voice = form
            .voice
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::Validation("Voice selection is missing from the request.".to_string())
            })?;
        let stability = parse_stability(form.stability.as_deref())?;

        tracing::info!(
            request_id = %request_id,
            file = %original_name,
            voice = %voice,
            stability = stability,
            "Starting text extraction"
        );

        let upload_path = upload.path().to_path_buf();
        let text = tokio::task::spawn_blocking(move || extract_text(&upload_path))
            .await
            .map_err(|e| AppError::Internal(format!("Text extraction task failed: {}", e)))??;

        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "Could not extract any text from the file. It might be image-based, empty, or protected."
                    .to_string(),
            ));
        }

        let audio_file_name = file_names::audio_file_name(&original_name, &voice);
        let output_path = controller.audio_dir.join(&audio_file_name);

        let outcome = controller
            .speech_service
            .synthesize_to_file(&text, &voice, stability, &output_path)
            .await?;

        tracing::info!(
            request_id = %request_id,
            file = %original_name,
            audio = %audio_file_name,
            text_length = text.chars().count(),
            characters_submitted = outcome.characters_submitted,
            truncated = outcome.truncated,
            audio_size_bytes = outcome.audio_size_bytes,
            elapsed_ms = start_time.elapsed().as_millis(),
            "Processing successful"
        );

        Ok(Json(ProcessResponse::success(format!("/audio/{}", audio_file_name))))
    }
}
