pub mod error;
pub mod model;
pub mod service;

pub use error::SpeechServiceError;
pub use model::{SynthesisOutcome, SynthesisRequest, VoiceDescriptor};
pub use service::{SpeechService, SpeechServiceApi, MAX_TEXT_CHARS};
