//! Image acquisition: local files and remote URLs.
//!
//! Remote fetches gate on an `image/*` Content-Type so arbitrary documents
//! never reach the extraction pipeline. Google Drive share links are
//! rewritten to their direct-download form first.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::debug;

use packlens_core::ImagePayload;

use crate::mime_detect::{detect_mime_type, sniff_image_mime};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Rewrite a Google Drive share link into a direct-download URL.
/// Non-Drive URLs pass through unchanged.
pub fn normalize_drive_url(url: &str) -> String {
    if !url.contains("drive.google.com") {
        return url.to_string();
    }
    if let Some(rest) = url.split("id=").nth(1) {
        let file_id = rest.split('&').next().unwrap_or(rest);
        return format!("https://drive.google.com/uc?export=download&id={file_id}");
    }
    if let Some(rest) = url.split("/file/d/").nth(1) {
        let file_id = rest.split('/').next().unwrap_or(rest);
        return format!("https://drive.google.com/uc?export=download&id={file_id}");
    }
    url.to_string()
}

/// Download an image over HTTP(S) into an [`ImagePayload`].
pub async fn fetch_image(client: &reqwest::Client, url: &str) -> Result<ImagePayload> {
    let normalized = normalize_drive_url(url);
    debug!(url = %normalized, "fetching image");

    let resp = client
        .get(&normalized)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await
        .context("image download failed")?;

    let status = resp.status();
    if !status.is_success() {
        bail!("image download failed: HTTP {status}");
    }

    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_string();
    if !content_type.starts_with("image/") {
        bail!("URL did not return an image (Content-Type: {content_type})");
    }

    let data = resp.bytes().await.context("reading image body failed")?;
    Ok(ImagePayload::new(data, content_type, normalized))
}

/// Read a local file into an [`ImagePayload`].
///
/// MIME type comes from the extension, corrected by a magic-byte sniff when
/// the two disagree.
pub fn load_image(path: &Path) -> Result<ImagePayload> {
    let data = std::fs::read(path)
        .with_context(|| format!("failed to read image file {}", path.display()))?;

    let mime = match sniff_image_mime(&data) {
        Some(sniffed) => sniffed,
        None => detect_mime_type(path),
    };

    Ok(ImagePayload::new(data, mime, path.display().to_string()))
}
