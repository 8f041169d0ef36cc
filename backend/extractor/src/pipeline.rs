//! The extraction pipeline: input gating, one transport round trip, status
//! classification, schema decode.
//!
//! The pipeline never retries. Retry policy belongs to the caller, which
//! sees every failure as a classified [`ExtractError`].

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use media::is_supported_image;
use packlens_core::{
    CompletionTransport, Credential, CredentialCheck, ExtractError, ExtractionRequest,
    ExtractionResult, ImagePayload, TransportFault, TransportReply,
};

use crate::prompt;
use crate::response;
use crate::schema;

/// Default upstream model.
pub const DEFAULT_MODEL: &str = "gpt-5.2";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Stateless extraction front end over an injected transport.
///
/// Holds no mutable state between calls, so one instance can serve any
/// number of concurrent extractions.
pub struct Extractor {
    transport: Arc<dyn CompletionTransport>,
    model: String,
    timeout: Duration,
}

impl Extractor {
    pub fn new(transport: Arc<dyn CompletionTransport>) -> Self {
        Self {
            transport,
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run one extraction without external cancellation.
    pub async fn extract(&self, image: &ImagePayload, credential: &Credential) -> ExtractionResult {
        self.extract_with_cancel(image, credential, &CancellationToken::new())
            .await
    }

    /// Run one extraction, abandoning the in-flight call if `cancel` fires.
    pub async fn extract_with_cancel(
        &self,
        image: &ImagePayload,
        credential: &Credential,
        cancel: &CancellationToken,
    ) -> ExtractionResult {
        if image.is_empty() {
            return Err(ExtractError::InvalidInput("image content is empty".to_string()));
        }
        if !is_supported_image(&image.mime_type) {
            return Err(ExtractError::InvalidInput(format!(
                "unsupported image type: {}",
                image.mime_type
            )));
        }
        if credential.is_empty() {
            return Err(ExtractError::MissingCredential);
        }

        let request = ExtractionRequest {
            model: self.model.clone(),
            system_prompt: prompt::system_prompt(),
            user_prompt: prompt::build_user_prompt(),
            image_data_url: image.to_data_url(),
            credential: credential.clone(),
        };

        let request_id = Uuid::new_v4();
        debug!(
            %request_id,
            transport = self.transport.name(),
            model = %self.model,
            image_bytes = image.data.len(),
            source = %image.source,
            "sending extraction request"
        );

        let reply = tokio::select! {
            _ = cancel.cancelled() => {
                info!(%request_id, "extraction cancelled by caller");
                return Err(ExtractError::Cancelled);
            }
            outcome = tokio::time::timeout(self.timeout, self.transport.send(&request)) => {
                match outcome {
                    Err(_) => {
                        warn!(%request_id, timeout = ?self.timeout, "no reply within timeout");
                        return Err(ExtractError::Network(format!(
                            "no reply from upstream within {:?}",
                            self.timeout
                        )));
                    }
                    Ok(Err(fault)) => return Err(network_error(fault)),
                    Ok(Ok(reply)) => reply,
                }
            }
        };

        if let Some(err) = classify_status(&reply) {
            warn!(%request_id, status = reply.status, "upstream returned an error status");
            return Err(err);
        }

        let output_text = response::collect_output_text(&reply.body)?;
        let record = schema::parse_feature_record(&output_text)?;
        info!(%request_id, "extraction succeeded");
        Ok(record)
    }
}

/// Probe a credential against the upstream without spending an extraction.
pub async fn verify_credential(
    check: &dyn CredentialCheck,
    credential: &Credential,
) -> Result<(), ExtractError> {
    if credential.is_empty() {
        return Err(ExtractError::MissingCredential);
    }
    let reply = check.check(credential).await.map_err(network_error)?;
    match classify_status(&reply) {
        None => Ok(()),
        Some(err) => Err(err),
    }
}

fn network_error(fault: TransportFault) -> ExtractError {
    match fault {
        TransportFault::Timeout => ExtractError::Network("request timed out".to_string()),
        TransportFault::Connection(message) => ExtractError::Network(message),
    }
}

/// Map an HTTP status onto the error taxonomy. `None` means success.
///
/// 401/403 are credential problems; 408/429 and 5xx are worth a caller-side
/// retry; every other non-success status means the upstream rejected the
/// request payload itself.
fn classify_status(reply: &TransportReply) -> Option<ExtractError> {
    match reply.status {
        200..=299 => None,
        401 | 403 => Some(ExtractError::Authentication(response::error_detail(&reply.body))),
        408 | 429 | 500..=599 => Some(ExtractError::Transient {
            status: reply.status,
            message: response::error_detail(&reply.body),
        }),
        status => Some(ExtractError::InvalidInput(format!(
            "upstream rejected the request (HTTP {status}): {}",
            response::error_detail(&reply.body)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockTransport;
    use packlens_core::FeatureRecord;

    fn record_json() -> &'static str {
        r#"{
            "flavors_list": ["Blue Razz Ice"],
            "multiple_descriptors": "0",
            "extraction_evidence": "front panel",
            "brand_name": "STAR BUZZ",
            "nicotine_content": "5%",
            "size_or_volume": "6000 puffs",
            "warning_label_present": "Yes",
            "warning_label_location": "top banner",
            "main_color": ["skyblue"]
        }"#
    }

    fn envelope_with(text: &str) -> String {
        serde_json::json!({
            "output": [{
                "type": "message",
                "content": [{ "type": "output_text", "text": text }]
            }]
        })
        .to_string()
    }

    fn png_image() -> ImagePayload {
        ImagePayload::new(vec![0x89u8, 0x50, 0x4e, 0x47], "image/png", "test.png")
    }

    fn credential() -> Credential {
        Credential::new("sk-test-key")
    }

    #[tokio::test]
    async fn success_returns_full_key_set() {
        let mock = Arc::new(MockTransport::replying(200, envelope_with(record_json())));
        let extractor = Extractor::new(mock.clone());

        let record = extractor.extract(&png_image(), &credential()).await.unwrap();

        let value = serde_json::to_value(&record).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        let mut expected = FeatureRecord::FIELDS.to_vec();
        expected.sort_unstable();
        assert_eq!(keys, expected);
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn empty_image_short_circuits_before_network() {
        let mock = Arc::new(MockTransport::replying(200, envelope_with(record_json())));
        let extractor = Extractor::new(mock.clone());

        let image = ImagePayload::new(Vec::<u8>::new(), "image/png", "empty.png");
        let err = extractor.extract(&image, &credential()).await.unwrap_err();

        assert!(matches!(err, ExtractError::InvalidInput(_)));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn unsupported_mime_is_invalid_input() {
        let mock = Arc::new(MockTransport::replying(200, envelope_with(record_json())));
        let extractor = Extractor::new(mock.clone());

        let image = ImagePayload::new(vec![1u8, 2, 3], "application/pdf", "doc.pdf");
        let err = extractor.extract(&image, &credential()).await.unwrap_err();

        assert!(matches!(err, ExtractError::InvalidInput(_)));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn empty_credential_short_circuits_before_network() {
        let mock = Arc::new(MockTransport::replying(200, envelope_with(record_json())));
        let extractor = Extractor::new(mock.clone());

        let err = extractor
            .extract(&png_image(), &Credential::new(""))
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractError::MissingCredential));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn http_401_is_authentication_error() {
        let body = r#"{"error":{"message":"Incorrect API key","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        let mock = Arc::new(MockTransport::replying(401, body));
        let extractor = Extractor::new(mock);

        let err = extractor.extract(&png_image(), &credential()).await.unwrap_err();
        match err {
            ExtractError::Authentication(message) => assert!(message.contains("Incorrect API key")),
            other => panic!("expected Authentication, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_429_and_500_are_transient() {
        for status in [429u16, 500] {
            let mock = Arc::new(MockTransport::replying(status, "overloaded"));
            let extractor = Extractor::new(mock);
            let err = extractor.extract(&png_image(), &credential()).await.unwrap_err();
            match err {
                ExtractError::Transient { status: got, .. } => assert_eq!(got, status),
                other => panic!("expected Transient for {status}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn http_400_is_invalid_input() {
        let mock = Arc::new(MockTransport::replying(400, "bad request"));
        let extractor = Extractor::new(mock);
        let err = extractor.extract(&png_image(), &credential()).await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn missing_schema_key_is_malformed_response() {
        let mut output: serde_json::Value = serde_json::from_str(record_json()).unwrap();
        output.as_object_mut().unwrap().remove("main_color");
        let mock = Arc::new(MockTransport::replying(200, envelope_with(&output.to_string())));
        let extractor = Extractor::new(mock);

        let err = extractor.extract(&png_image(), &credential()).await.unwrap_err();
        assert!(matches!(err, ExtractError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn non_json_output_is_malformed_response() {
        let mock = Arc::new(MockTransport::replying(200, envelope_with("not json at all")));
        let extractor = Extractor::new(mock);

        let err = extractor.extract(&png_image(), &credential()).await.unwrap_err();
        assert!(matches!(err, ExtractError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn slow_transport_times_out_as_network_error() {
        let mock = Arc::new(
            MockTransport::replying(200, envelope_with(record_json()))
                .with_delay(Duration::from_millis(200)),
        );
        let extractor = Extractor::new(mock).with_timeout(Duration::from_millis(100));

        let start = std::time::Instant::now();
        let err = extractor.extract(&png_image(), &credential()).await.unwrap_err();

        assert!(matches!(err, ExtractError::Network(_)));
        assert!(start.elapsed() < Duration::from_millis(190));
    }

    #[tokio::test]
    async fn connection_failure_is_network_error() {
        let mock = Arc::new(MockTransport::unreachable("connection reset by peer"));
        let extractor = Extractor::new(mock);

        let err = extractor.extract(&png_image(), &credential()).await.unwrap_err();
        match err {
            ExtractError::Network(message) => assert!(message.contains("connection reset")),
            other => panic!("expected Network, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancelled_token_yields_cancelled() {
        let mock = Arc::new(
            MockTransport::replying(200, envelope_with(record_json()))
                .with_delay(Duration::from_millis(200)),
        );
        let extractor = Extractor::new(mock);

        let token = CancellationToken::new();
        token.cancel();
        let err = extractor
            .extract_with_cancel(&png_image(), &credential(), &token)
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractError::Cancelled));
    }

    #[tokio::test]
    async fn identical_calls_are_idempotent() {
        let mock = Arc::new(MockTransport::replying(200, envelope_with(record_json())));
        let extractor = Extractor::new(mock.clone());

        let first = extractor.extract(&png_image(), &credential()).await.unwrap();
        let second = extractor.extract(&png_image(), &credential()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn verify_credential_accepts_200() {
        let mock = MockTransport::replying(200, r#"{"data":[]}"#);
        assert!(verify_credential(&mock, &credential()).await.is_ok());
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn verify_credential_classifies_401() {
        let mock = MockTransport::replying(401, "");
        let err = verify_credential(&mock, &credential()).await.unwrap_err();
        assert!(matches!(err, ExtractError::Authentication(_)));
    }

    #[tokio::test]
    async fn verify_credential_rejects_empty_key_without_probe() {
        let mock = MockTransport::replying(200, "");
        let err = verify_credential(&mock, &Credential::new("  ")).await.unwrap_err();
        assert!(matches!(err, ExtractError::MissingCredential));
        assert_eq!(mock.calls(), 0);
    }
}
