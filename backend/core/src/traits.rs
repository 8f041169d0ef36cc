use async_trait::async_trait;

use crate::error::TransportFault;
use crate::types::{Credential, ExtractionRequest, TransportReply};

/// Trait for completion transports used by the extraction pipeline.
///
/// One implementation per upstream API; tests inject mocks. Implementations
/// hold no per-call state, so a single instance can serve concurrent calls.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    /// Transport name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send one completion request and return the raw HTTP-level reply.
    ///
    /// Only sub-HTTP failures (timeout, connection reset) surface as
    /// [`TransportFault`]; any reply with a status code comes back as a
    /// [`TransportReply`] so the pipeline owns status classification.
    async fn send(&self, request: &ExtractionRequest) -> Result<TransportReply, TransportFault>;
}

/// Trait for probing whether a credential is accepted by the upstream,
/// without spending an extraction call.
#[async_trait]
pub trait CredentialCheck: Send + Sync {
    async fn check(&self, credential: &Credential) -> Result<TransportReply, TransportFault>;
}
