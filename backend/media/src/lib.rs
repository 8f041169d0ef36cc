//! Image acquisition and MIME handling for PackLens.

pub mod fetch;
pub mod mime_detect;

pub use fetch::{fetch_image, load_image, normalize_drive_url};
pub use mime_detect::{detect_mime_type, is_image, is_supported_image, sniff_image_mime};
