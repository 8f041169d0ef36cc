//! Core types, traits, and the error taxonomy for the PackLens pipeline.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ExtractError, TransportFault};
pub use traits::{CompletionTransport, CredentialCheck};
pub use types::{Credential, ExtractionRequest, FeatureRecord, ImagePayload, TransportReply};

/// Discriminated outcome of one extraction: a full record or a classified error.
pub type ExtractionResult = Result<FeatureRecord, ExtractError>;
