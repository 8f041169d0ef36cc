//! Telemetry and structured logging for PackLens.
//!
//! Handles log redaction and console/file subscriber setup.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::redact_sensitive_data;
