use std::path::Path;
use uuid::Uuid;

/// The only document format accepted, lowercase and without the dot
pub const SUPPORTED_EXTENSION: &str = "pdf";

const MAX_STEM_CHARS: usize = 20;
const MAX_VOICE_CHARS: usize = 15;
const TOKEN_CHARS: usize = 16;

/// Lowercased extension of a file name, without the dot
pub fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

pub fn is_supported(file_name: &str) -> bool {
    extension_of(file_name).as_deref() == Some(SUPPORTED_EXTENSION)
}

/// Random URL-safe token used to make names unique and unguessable
pub fn random_token() -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(TOKEN_CHARS);
    token
}

/// File stem reduced to ASCII alphanumerics, `_` and `-`
pub fn sanitize_stem(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    stem.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .take(MAX_STEM_CHARS)
        .collect()
}

/// Voice name reduced to ASCII alphanumerics
pub fn sanitize_voice(voice: &str) -> String {
    voice
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(MAX_VOICE_CHARS)
        .collect()
}

/// Fixed start of every staged upload name
pub const UPLOAD_PREFIX: &str = "upload_";

/// Tail of a staged upload name, `_<stem>.<ext>`. The random part between
/// [`UPLOAD_PREFIX`] and this suffix is chosen when the file is created.
pub fn upload_suffix(original_name: &str) -> String {
    let extension = extension_of(original_name).unwrap_or_default();
    format!("_{}.{}", sanitize_stem(original_name), extension)
}

/// `<stem>_<voice>_<token>.mp3`
pub fn audio_file_name(original_name: &str, voice: &str) -> String {
    format!(
        "{}_{}_{}.mp3",
        sanitize_stem(original_name),
        sanitize_voice(voice),
        random_token()
    )
}
