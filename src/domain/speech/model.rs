/// A synthetic speaker registered with the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceDescriptor {
    pub name: String,
    pub voice_id: String,
}

impl VoiceDescriptor {
    pub fn new(name: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            voice_id: voice_id.into(),
        }
    }

    /// Case-insensitive exact name match
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Everything the provider needs to render one piece of audio
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_id: String,
    pub stability: f64,
    pub similarity_boost: f64,
    pub model_id: String,
}

#[derive(Debug, Clone)]
pub struct SynthesisOutcome {
    pub voice_name: String,
    pub characters_submitted: usize,
    pub truncated: bool,
    pub audio_size_bytes: usize,
}
