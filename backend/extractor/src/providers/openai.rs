use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use packlens_core::{
    CompletionTransport, Credential, CredentialCheck, ExtractionRequest, TransportFault,
    TransportReply,
};

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

const KEY_PROBE_TIMEOUT: Duration = Duration::from_secs(15);

/// OpenAI Responses API transport.
pub struct OpenAiTransport {
    client: Client,
    base_url: String,
}

impl OpenAiTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: OPENAI_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for OpenAiTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ResponsesRequest {
    model: String,
    input: Vec<InputMessage>,
    text: TextOptions,
}

#[derive(Serialize)]
struct InputMessage {
    role: &'static str,
    content: Vec<InputPart>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum InputPart {
    #[serde(rename = "input_text")]
    Text { text: String },
    #[serde(rename = "input_image")]
    Image { image_url: String },
}

#[derive(Serialize)]
struct TextOptions {
    format: TextFormat,
}

#[derive(Serialize)]
struct TextFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

fn build_body(request: &ExtractionRequest) -> ResponsesRequest {
    ResponsesRequest {
        model: request.model.clone(),
        input: vec![
            InputMessage {
                role: "system",
                content: vec![InputPart::Text {
                    text: request.system_prompt.clone(),
                }],
            },
            InputMessage {
                role: "user",
                content: vec![
                    InputPart::Text {
                        text: request.user_prompt.clone(),
                    },
                    InputPart::Image {
                        image_url: request.image_data_url.clone(),
                    },
                ],
            },
        ],
        text: TextOptions {
            format: TextFormat { kind: "json_object" },
        },
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportFault {
    if e.is_timeout() {
        TransportFault::Timeout
    } else {
        TransportFault::Connection(e.without_url().to_string())
    }
}

#[async_trait]
impl CompletionTransport for OpenAiTransport {
    fn name(&self) -> &str {
        "openai"
    }

    async fn send(&self, request: &ExtractionRequest) -> Result<TransportReply, TransportFault> {
        debug!(model = %request.model, "sending request to OpenAI Responses API");

        let response = self
            .client
            .post(format!("{}/responses", self.base_url))
            .bearer_auth(request.credential.expose())
            .json(&build_body(request))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        Ok(TransportReply { status, body })
    }
}

#[async_trait]
impl CredentialCheck for OpenAiTransport {
    async fn check(&self, credential: &Credential) -> Result<TransportReply, TransportFault> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(credential.expose())
            .timeout(KEY_PROBE_TIMEOUT)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        Ok(TransportReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_embeds_image_inline() {
        let request = ExtractionRequest {
            model: "gpt-5.2".into(),
            system_prompt: "sys".into(),
            user_prompt: "user".into(),
            image_data_url: "data:image/png;base64,AAAA".into(),
            credential: Credential::new("sk-test"),
        };
        let value = serde_json::to_value(build_body(&request)).unwrap();
        assert_eq!(value["model"], "gpt-5.2");
        assert_eq!(value["input"][0]["role"], "system");
        assert_eq!(value["input"][1]["content"][1]["type"], "input_image");
        assert_eq!(
            value["input"][1]["content"][1]["image_url"],
            "data:image/png;base64,AAAA"
        );
        assert_eq!(value["text"]["format"]["type"], "json_object");
    }

    #[test]
    fn serialized_body_never_contains_credential() {
        let request = ExtractionRequest {
            model: "gpt-5.2".into(),
            system_prompt: "sys".into(),
            user_prompt: "user".into(),
            image_data_url: "data:image/png;base64,AAAA".into(),
            credential: Credential::new("sk-very-secret"),
        };
        let body = serde_json::to_string(&build_body(&request)).unwrap();
        assert!(!body.contains("sk-very-secret"));
    }
}
