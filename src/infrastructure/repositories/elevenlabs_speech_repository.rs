use super::speech_repository::{ProviderError, SpeechRepository};
use crate::domain::speech::{SynthesisRequest, VoiceDescriptor};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const API_KEY_HEADER: &str = "xi-api-key";

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    voices: Vec<ElevenLabsVoice>,
}

#[derive(Debug, Deserialize)]
struct ElevenLabsVoice {
    voice_id: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct TextToSpeechBody<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f64,
    similarity_boost: f64,
}

/// ElevenLabs implementation of the speech repository
pub struct ElevenLabsSpeechRepository {
    base_url: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl ElevenLabsSpeechRepository {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            http_client: reqwest::Client::new(),
        }
    }

    /// Turn a non-success response into a status error, keeping the
    /// provider's own message when it sends one.
    async fn status_error(response: reqwest::Response) -> ProviderError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "No details available".to_string());

        ProviderError::Status {
            status,
            detail: extract_detail(&body),
        }
    }
}

/// Pull `detail.message` out of an error body, falling back to the raw text
fn extract_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            let detail = value.get("detail")?;
            detail
                .get("message")
                .and_then(|m| m.as_str())
                .or_else(|| detail.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

fn transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_decode() {
        ProviderError::Unexpected(err.to_string())
    } else {
        ProviderError::Transport(err.to_string())
    }
}

#[async_trait]
impl SpeechRepository for ElevenLabsSpeechRepository {
    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, ProviderError> {
        let url = format!("{}/voices", self.base_url);

        tracing::debug!(url = %url, "Fetching ElevenLabs voice list");

        let response = self
            .http_client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let err = Self::status_error(response).await;
            tracing::error!(error = %err, "ElevenLabs voice listing failed");
            return Err(err);
        }

        let body: VoicesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unexpected(format!("Invalid voice list: {}", e)))?;

        Ok(body
            .voices
            .into_iter()
            .map(|v| VoiceDescriptor::new(v.name, v.voice_id))
            .collect())
    }

    async fn generate(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ProviderError> {
        let url = format!("{}/text-to-speech/{}", self.base_url, request.voice_id);
        let start_time = std::time::Instant::now();

        tracing::info!(
            voice_id = %request.voice_id,
            model = %request.model_id,
            stability = request.stability,
            text_length = request.text.chars().count(),
            "Calling ElevenLabs text-to-speech API"
        );

        let body = TextToSpeechBody {
            text: &request.text,
            model_id: &request.model_id,
            voice_settings: VoiceSettings {
                stability: request.stability,
                similarity_boost: request.similarity_boost,
            },
        };

        let response = self
            .http_client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let err = Self::status_error(response).await;
            tracing::error!(error = %err, "ElevenLabs audio generation failed");
            return Err(err);
        }

        let audio = response.bytes().await.map_err(transport_error)?;

        tracing::info!(
            provider = "elevenlabs",
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio.len(),
            "ElevenLabs audio received"
        );

        Ok(audio.to_vec())
    }
}
