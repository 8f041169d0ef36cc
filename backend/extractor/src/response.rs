//! Typed decode of the Responses API reply envelope.
//!
//! The upstream wraps model output in `output[].content[]` parts; only
//! `output_text` parts of `message` items carry the JSON we asked for.

use serde::Deserialize;

use packlens_core::ExtractError;

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Pull the concatenated `output_text` out of a raw reply body.
pub fn collect_output_text(body: &str) -> Result<String, ExtractError> {
    let envelope: ResponseEnvelope = serde_json::from_str(body).map_err(|e| {
        ExtractError::MalformedResponse(format!("reply envelope is not valid JSON: {e}"))
    })?;

    let texts: Vec<&str> = envelope
        .output
        .iter()
        .filter(|item| item.kind == "message")
        .flat_map(|item| item.content.iter())
        .filter(|part| part.kind == "output_text" && !part.text.is_empty())
        .map(|part| part.text.as_str())
        .collect();

    if texts.is_empty() {
        return Err(ExtractError::MalformedResponse(
            "reply contains no output_text".to_string(),
        ));
    }
    Ok(texts.join("\n"))
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    code: String,
}

/// Human-readable detail from an upstream error body.
///
/// Falls back to a truncated slice of the raw body when the body is not the
/// API's error envelope. The result ends up in log lines and user-facing
/// messages, so it is scrubbed of tokens and inline image data first.
pub fn error_detail(body: &str) -> String {
    let detail = if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if !envelope.error.message.is_empty() {
            format!(
                "{} (type={}, code={})",
                envelope.error.message, envelope.error.kind, envelope.error.code
            )
        } else {
            body.chars().take(500).collect()
        }
    } else {
        body.chars().take(500).collect()
    };
    logging::redact_sensitive_data(&detail)
}
