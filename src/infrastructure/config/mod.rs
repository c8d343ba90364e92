use serde::Deserialize;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io/v1";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    // Speech provider
    pub elevenlabs_api_key: String,
    pub elevenlabs_base_url: String,
    // Storage
    pub upload_dir: PathBuf,
    pub audio_dir: PathBuf,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let elevenlabs_api_key = lookup("ELEVENLABS_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or("ELEVENLABS_API_KEY not found in environment or .env file")?;

        let max_upload_mb: usize = var_or("MAX_UPLOAD_MB", "50")
            .parse()
            .map_err(|e| format!("MAX_UPLOAD_MB must be a whole number of megabytes: {}", e))?;
        let max_upload_bytes = max_upload_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| format!("MAX_UPLOAD_MB is too large: {}", max_upload_mb))?;

        let config = Config {
            host: var_or("HOST", "127.0.0.1"),
            port: var_or("PORT", "5001")
                .parse()
                .map_err(|e| format!("PORT must be a valid port number: {}", e))?,
            log_format: match var_or("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            elevenlabs_api_key,
            elevenlabs_base_url: var_or("ELEVENLABS_BASE_URL", DEFAULT_ELEVENLABS_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            upload_dir: PathBuf::from(var_or("UPLOAD_DIR", "static/uploads")),
            audio_dir: PathBuf::from(var_or("AUDIO_DIR", "static/audio")),
            max_upload_bytes,
        };

        Ok(config)
    }

    /// Create the upload staging and audio output directories if absent
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.upload_dir)?;
        std::fs::create_dir_all(&self.audio_dir)?;
        Ok(())
    }
}
