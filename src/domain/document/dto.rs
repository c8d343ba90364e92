use serde::{Deserialize, Serialize};

/// Response for POST /process
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl ProcessResponse {
    pub fn success(audio_url: String) -> Self {
        Self {
            status: "success".to_string(),
            message: "Audio generated successfully!".to_string(),
            audio_url: Some(audio_url),
        }
    }
}
