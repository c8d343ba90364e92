use crate::domain::speech::{SynthesisRequest, VoiceDescriptor};
use async_trait::async_trait;

/// Transport-level failures reported by a speech provider.
///
/// Interpretation (which status means what for the user) happens in the
/// domain layer, not here.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("provider returned status {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("request could not be completed: {0}")]
    Transport(String),
    #[error("{0}")]
    Unexpected(String),
}

/// Repository for speech synthesis operations.
/// Abstracts the remote provider so the service can be exercised with a fake.
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// List the voices registered with the provider
    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, ProviderError>;

    /// Render the request to audio (MP3). May return an empty buffer.
    async fn generate(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ProviderError>;
}
