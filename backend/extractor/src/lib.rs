//! The PackLens extraction pipeline.
//!
//! One image and one per-call credential in, one validated
//! [`FeatureRecord`](packlens_core::FeatureRecord) or one classified
//! [`ExtractError`](packlens_core::ExtractError) out. Exactly one upstream
//! call per invocation, no retries, no retained state.

pub mod pipeline;
pub mod prompt;
pub mod providers;
pub mod response;
pub mod schema;

pub use pipeline::{verify_credential, Extractor, DEFAULT_MODEL};
pub use providers::{MockTransport, OpenAiTransport, OPENAI_API_BASE};
pub use schema::parse_feature_record;
