use super::error::SpeechServiceError;
use super::model::{SynthesisOutcome, SynthesisRequest, VoiceDescriptor};
use crate::infrastructure::repositories::SpeechRepository;
use anyhow::Context;
use async_trait::async_trait;
use moka::future::Cache;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Longest text submitted to the provider, in characters. Longer text is cut.
pub const MAX_TEXT_CHARS: usize = 4800;
/// Similarity boost sent with every request; not user-configurable.
pub const SIMILARITY_BOOST: f64 = 0.75;
pub const MODEL_ID: &str = "eleven_multilingual_v2";

const VOICE_LIST_KEY: &str = "voices";

pub struct SpeechService {
    speech_repo: Arc<dyn SpeechRepository>,
    voice_cache: Cache<String, Arc<Vec<VoiceDescriptor>>>,
    last_fetch_error: RwLock<Option<String>>,
}

impl SpeechService {
    pub fn new(speech_repo: Arc<dyn SpeechRepository>) -> Self {
        // Single entry, never expires; replaced on each successful fetch
        let voice_cache = Cache::builder().max_capacity(1).build();

        Self {
            speech_repo,
            voice_cache,
            last_fetch_error: RwLock::new(None),
        }
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Return the cached voice list, fetching it from the provider when the
    /// cache is cold.
    async fn resolve_voices(&self) -> Result<Arc<Vec<VoiceDescriptor>>, SpeechServiceError>;

    /// Synthesize `text` with the named voice and write the audio to `output_path`
    ///
    /// This operation:
    /// - Resolves the voice name (case-insensitive) against the voice list
    /// - Truncates text beyond `MAX_TEXT_CHARS`
    /// - Calls the provider once, without retrying
    /// - Writes the returned audio bytes
    async fn synthesize_to_file(
        &self,
        text: &str,
        voice_name: &str,
        stability: f64,
        output_path: &Path,
    ) -> Result<SynthesisOutcome, SpeechServiceError>;

    /// Reason the most recent voice fetch failed, if it did
    async fn last_fetch_error(&self) -> Option<String>;

    /// Whether a voice list is held in memory
    async fn has_cached_voices(&self) -> bool;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn resolve_voices(&self) -> Result<Arc<Vec<VoiceDescriptor>>, SpeechServiceError> {
        if let Some(voices) = self.voice_cache.get(VOICE_LIST_KEY).await {
            tracing::debug!(voice_count = voices.len(), "Using cached voice list");
            return Ok(voices);
        }

        tracing::info!("Fetching voice list from speech provider");

        let reason = match self.speech_repo.list_voices().await {
            Ok(voices) if !voices.is_empty() => {
                let voices = Arc::new(voices);
                self.voice_cache
                    .insert(VOICE_LIST_KEY.to_string(), voices.clone())
                    .await;
                *self.last_fetch_error.write().await = None;
                tracing::info!(voice_count = voices.len(), "Voice list fetched and cached");
                return Ok(voices);
            }
            Ok(_) => "Failed to fetch a valid voice list (empty list received).".to_string(),
            Err(e) => {
                tracing::error!(error = %e, "Voice list fetch failed");
                SpeechServiceError::voice_fetch_reason(&e)
            }
        };

        *self.last_fetch_error.write().await = Some(reason.clone());
        Err(SpeechServiceError::Connectivity(reason))
    }

    async fn synthesize_to_file(
        &self,
        text: &str,
        voice_name: &str,
        stability: f64,
        output_path: &Path,
    ) -> Result<SynthesisOutcome, SpeechServiceError> {
        if text.trim().is_empty() {
            return Err(SpeechServiceError::Validation(
                "No text provided to convert to speech.".to_string(),
            ));
        }

        let voices = self.resolve_voices().await.map_err(|e| match e {
            SpeechServiceError::Connectivity(reason) => SpeechServiceError::Connectivity(format!(
                "Could not confirm available voices before generation: {}",
                reason
            )),
            other => other,
        })?;
        let voice = find_voice(&voices, voice_name)?;

        let (text, truncated) = truncate_text(text);
        if truncated {
            tracing::warn!(
                max_chars = MAX_TEXT_CHARS,
                "Text too long, truncating before synthesis"
            );
        }
        let characters_submitted = text.chars().count();

        tracing::info!(
            voice = %voice.name,
            voice_id = %voice.voice_id,
            stability = stability,
            characters = characters_submitted,
            "Requesting audio generation"
        );

        let request = SynthesisRequest {
            text,
            voice_id: voice.voice_id.clone(),
            stability,
            similarity_boost: SIMILARITY_BOOST,
            model_id: MODEL_ID.to_string(),
        };

        let audio = self
            .speech_repo
            .generate(&request)
            .await
            .map_err(SpeechServiceError::from_generation_failure)?;

        if audio.is_empty() {
            tracing::error!("Audio generation returned no data");
            return Err(SpeechServiceError::Connectivity(
                "Failed to generate audio data (received empty response).".to_string(),
            ));
        }

        tokio::fs::write(output_path, &audio)
            .await
            .with_context(|| format!("Failed to write audio to {}", output_path.display()))?;

        tracing::info!(
            path = %output_path.display(),
            audio_size_bytes = audio.len(),
            "Audio saved"
        );

        Ok(SynthesisOutcome {
            voice_name: voice.name.clone(),
            characters_submitted,
            truncated,
            audio_size_bytes: audio.len(),
        })
    }

    async fn last_fetch_error(&self) -> Option<String> {
        self.last_fetch_error.read().await.clone()
    }

    async fn has_cached_voices(&self) -> bool {
        self.voice_cache.get(VOICE_LIST_KEY).await.is_some()
    }
}

/// Case-insensitive exact lookup; the error lists every available name
fn find_voice<'a>(
    voices: &'a [VoiceDescriptor],
    name: &str,
) -> Result<&'a VoiceDescriptor, SpeechServiceError> {
    voices.iter().find(|v| v.matches_name(name)).ok_or_else(|| {
        let available: Vec<&str> = voices.iter().map(|v| v.name.as_str()).collect();
        SpeechServiceError::Validation(format!(
            "Selected voice '{}' not found. Available voices are: {}",
            name,
            available.join(", ")
        ))
    })
}

/// Cut text to `MAX_TEXT_CHARS` characters
fn truncate_text(text: &str) -> (String, bool) {
    match text.char_indices().nth(MAX_TEXT_CHARS) {
        Some((byte_index, _)) => (text[..byte_index].to_string(), true),
        None => (text.to_string(), false),
    }
}
