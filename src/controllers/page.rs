use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::domain::speech::{SpeechService, SpeechServiceApi};

const INDEX_TEMPLATE: &str = include_str!("index.html");

/// Shown when the provider's voice list cannot be loaded
pub const FALLBACK_VOICES: [&str; 5] = ["Rachel", "Adam", "Antoni", "Sarah", "Emily"];

pub struct PageController {
    speech_service: Arc<SpeechService>,
}

impl PageController {
    pub fn new(speech_service: Arc<SpeechService>) -> Self {
        Self { speech_service }
    }

    /// GET / - Upload form
    pub async fn index(State(controller): State<Arc<PageController>>) -> Html<String> {
        let (voice_names, error_message) = match controller.speech_service.resolve_voices().await {
            Ok(voices) => {
                let mut names: Vec<String> = voices.iter().map(|v| v.name.clone()).collect();
                names.sort();
                (names, None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not get voices for index page, using defaults");
                let reason = controller
                    .speech_service
                    .last_fetch_error()
                    .await
                    .unwrap_or_else(|| e.to_string());
                (
                    FALLBACK_VOICES.iter().map(|v| v.to_string()).collect(),
                    Some(reason),
                )
            }
        };

        Html(render_index(&voice_names, error_message.as_deref()))
    }
}

fn render_index(voice_names: &[String], error_message: Option<&str>) -> String {
    let voice_options = voice_names
        .iter()
        .map(|name| {
            let name = escape_html(name);
            format!("      <option value=\"{}\">{}</option>", name, name)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let error_banner = error_message
        .map(|msg| format!("<div class=\"alert alert-error\">{}</div>", escape_html(msg)))
        .unwrap_or_default();

    fill_template(INDEX_TEMPLATE, |placeholder| match placeholder {
        "voice_options" => Some(voice_options.as_str()),
        "error_banner" => Some(error_banner.as_str()),
        _ => None,
    })
}

/// Substitute `{{name}}` placeholders in one pass. Inserted values are never
/// scanned again; unknown placeholders are kept as written.
fn fill_template<'a>(
    template: &'a str,
    value_for: impl Fn(&str) -> Option<&'a str>,
) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find("}}") else {
            output.push_str(tail);
            return output;
        };
        let placeholder = &tail[2..end];
        output.push_str(value_for(placeholder).unwrap_or(&tail[..end + 2]));
        rest = &tail[end + 2..];
    }

    output.push_str(rest);
    output
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
