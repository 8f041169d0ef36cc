use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// An image captured from the caller, immutable for the lifetime of one call.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    /// Raw image bytes.
    pub data: Bytes,
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
    /// Diagnostic label only (file name or URL); never sent upstream.
    pub source: String,
}

impl ImagePayload {
    pub fn new(data: impl Into<Bytes>, mime_type: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
            source: source.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Inline `data:` URL embedding the image for the completion request.
    /// Images are always sent inline, never as a remote URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }
}

/// Per-call API key. Lives only for the duration of one request.
///
/// Deliberately opaque: `Debug` is redacted, there is no `Display`, and it
/// is never serialized. The raw key is readable only through [`expose`],
/// which exists to set the Authorization header.
///
/// [`expose`]: Credential::expose
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The raw key. Call sites should only pass this to an auth header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// One completion request, built fresh per call and never reused.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    /// Inline base64 `data:` URL of the image.
    pub image_data_url: String,
    pub credential: Credential,
}

/// Raw reply from a transport: HTTP status plus unparsed body.
#[derive(Debug, Clone)]
pub struct TransportReply {
    pub status: u16,
    pub body: String,
}

/// The structured extraction output.
///
/// The key set is fixed: serialization always emits every field, with
/// absent values as explicit nulls, so downstream consumers can rely on a
/// stable shape. Sentinel strings from the model ("Not found", ["missing"],
/// "n/a") are normalized to `None` before a record is ever returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Flavor descriptors exactly as printed on the package.
    pub flavors: Option<Vec<String>>,
    /// Whether more than one flavor descriptor was found; `None` when no
    /// descriptor could be read at all.
    pub multiple_descriptors: Option<bool>,
    pub brand_name: Option<String>,
    /// Model's note on where the flavor text was located.
    pub extraction_evidence: Option<String>,
    /// Nicotine strength verbatim, e.g. "5%" or "50mg".
    pub nicotine_content: Option<String>,
    /// Size or volume verbatim, e.g. "10ml" or "6000 puffs".
    pub size_or_volume: Option<String>,
    pub warning_label_present: bool,
    pub warning_label_location: Option<String>,
    /// Product colors restricted to the prompt's allowed vocabulary.
    pub main_colors: Option<Vec<String>>,
}

impl FeatureRecord {
    /// The declared schema, in serialization order.
    pub const FIELDS: [&'static str; 9] = [
        "flavors",
        "multiple_descriptors",
        "brand_name",
        "extraction_evidence",
        "nicotine_content",
        "size_or_volume",
        "warning_label_present",
        "warning_label_location",
        "main_colors",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_debug_is_redacted() {
        let cred = Credential::new("sk-super-secret-key-1234567890");
        let printed = format!("{:?}", cred);
        assert!(!printed.contains("secret"));
        assert_eq!(printed, "Credential(<redacted>)");
    }

    #[test]
    fn request_debug_does_not_leak_credential() {
        let request = ExtractionRequest {
            model: "gpt-5.2".into(),
            system_prompt: "sys".into(),
            user_prompt: "user".into(),
            image_data_url: "data:image/png;base64,AAAA".into(),
            credential: Credential::new("sk-super-secret-key-1234567890"),
        };
        assert!(!format!("{:?}", request).contains("sk-super-secret"));
    }

    #[test]
    fn data_url_encodes_mime_and_bytes() {
        let image = ImagePayload::new(vec![0x89u8, 0x50, 0x4e, 0x47], "image/png", "test.png");
        let url = image.to_data_url();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(url.ends_with("iVBORw=="));
    }

    #[test]
    fn record_serializes_every_declared_key() {
        let record = FeatureRecord {
            flavors: None,
            multiple_descriptors: None,
            brand_name: None,
            extraction_evidence: None,
            nicotine_content: None,
            size_or_volume: None,
            warning_label_present: false,
            warning_label_location: None,
            main_colors: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        let mut expected = FeatureRecord::FIELDS.to_vec();
        expected.sort_unstable();
        assert_eq!(keys, expected);
        assert!(value["flavors"].is_null());
    }
}
