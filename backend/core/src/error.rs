use thiserror::Error;

/// Top-level error type for the PackLens extraction pipeline.
///
/// Every failure reaches the caller as one of these variants; the pipeline
/// never retries on its own and never returns a partial record.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("missing API credential")]
    MissingCredential,

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("transient upstream failure (HTTP {status}): {message}")]
    Transient { status: u16, message: String },

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("network failure: {0}")]
    Network(String),

    #[error("extraction cancelled by caller")]
    Cancelled,
}

/// Failure below the HTTP layer, reported by a [`CompletionTransport`].
///
/// Anything that produced an HTTP status is a [`TransportReply`] instead,
/// so status classification stays in the pipeline.
///
/// [`CompletionTransport`]: crate::traits::CompletionTransport
/// [`TransportReply`]: crate::types::TransportReply
#[derive(Debug, Error)]
pub enum TransportFault {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),
}
