//! MIME type detection for uploaded package photos.
//!
//! Used to label images before they enter the extraction pipeline.

use std::path::Path;

/// Detect MIME type by file extension.
pub fn detect_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png"          => "image/png",
        "gif"          => "image/gif",
        "webp"         => "image/webp",
        "bmp"          => "image/bmp",
        "tiff" | "tif" => "image/tiff",

        _              => "application/octet-stream",
    }
}

/// Sniff an image MIME type from magic bytes.
///
/// Cross-checks uploads whose extension lies about the content.
pub fn sniff_image_mime(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a]) {
        return Some("image/png");
    }
    if data.starts_with(&[0xff, 0xd8, 0xff]) {
        return Some("image/jpeg");
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    None
}

/// Whether a MIME type is for an image.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Whether the pipeline accepts this image type for extraction.
pub fn is_supported_image(mime: &str) -> bool {
    matches!(
        mime,
        "image/png" | "image/jpeg" | "image/webp" | "image/gif"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_jpeg() {
        assert_eq!(detect_mime_type(&PathBuf::from("package.jpg")), "image/jpeg");
    }

    #[test]
    fn detects_webp() {
        assert_eq!(detect_mime_type(&PathBuf::from("box.webp")), "image/webp");
    }

    #[test]
    fn unknown_extension_fallback() {
        assert_eq!(detect_mime_type(&PathBuf::from("file.xyz")), "application/octet-stream");
    }

    #[test]
    fn sniffs_png_magic() {
        let data = [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00];
        assert_eq!(sniff_image_mime(&data), Some("image/png"));
    }

    #[test]
    fn sniffs_webp_riff_header() {
        let mut data = b"RIFF".to_vec();
        data.extend_from_slice(&[0, 0, 0, 0]);
        data.extend_from_slice(b"WEBP");
        assert_eq!(sniff_image_mime(&data), Some("image/webp"));
    }

    #[test]
    fn sniff_rejects_text() {
        assert_eq!(sniff_image_mime(b"hello world"), None);
    }

    #[test]
    fn supported_set_excludes_tiff() {
        assert!(is_supported_image("image/png"));
        assert!(is_supported_image("image/jpeg"));
        assert!(!is_supported_image("image/tiff"));
        assert!(!is_supported_image("application/pdf"));
    }
}
