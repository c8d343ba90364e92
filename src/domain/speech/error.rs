use crate::error::AppError;
use crate::infrastructure::repositories::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("not authorized: {0}")]
    Authorization(String),
    #[error("connectivity error: {0}")]
    Connectivity(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SpeechServiceError {
    /// Interpret a failed audio generation call.
    pub fn from_generation_failure(err: ProviderError) -> Self {
        match err {
            ProviderError::Status { status, detail } => match status {
                401 => Self::Authorization(format!(
                    "Authentication Error (Check API Key). Status: {}",
                    status
                )),
                400 if detail.to_lowercase().contains("text length") => Self::Validation(format!(
                    "Text too long for API request (limit might be ~5000 chars). Status: {}",
                    status
                )),
                400 => Self::Validation(format!(
                    "Bad Request (Check voice/settings/text). Status: {}. Details: {}",
                    status, detail
                )),
                402 => Self::Authorization(format!(
                    "Payment Required or Quota Exceeded. Status: {}",
                    status
                )),
                429 => Self::Connectivity(format!(
                    "Rate Limit Exceeded. Please wait before trying again. Status: {}",
                    status
                )),
                _ => Self::Connectivity(format!(
                    "API Error during audio generation: Status Code {}. Details: {}",
                    status, detail
                )),
            },
            ProviderError::Transport(msg) => {
                Self::Connectivity(format!("Could not reach the speech provider: {}", msg))
            }
            ProviderError::Unexpected(msg) => Self::Internal(anyhow::anyhow!(
                "Unexpected error during audio generation: {}",
                msg
            )),
        }
    }

    /// Reason recorded when the voice list cannot be fetched
    pub fn voice_fetch_reason(err: &ProviderError) -> String {
        match err {
            ProviderError::Status { status, .. } => {
                format!("API Error fetching voices: Status {}", status)
            }
            other => format!("Unexpected error fetching voices: {}", other),
        }
    }
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::Validation(msg) => AppError::Validation(msg),
            SpeechServiceError::Authorization(msg) => AppError::Authorization(msg),
            SpeechServiceError::Connectivity(msg) => AppError::Connectivity(msg),
            SpeechServiceError::Internal(e) => AppError::Internal(format!("{:#}", e)),
        }
    }
}
