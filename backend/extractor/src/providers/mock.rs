use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use packlens_core::{
    CompletionTransport, Credential, CredentialCheck, ExtractionRequest, TransportFault,
    TransportReply,
};

/// A deterministic transport that returns a canned reply.
///
/// Counts every call so tests can assert that input validation short-circuits
/// before the network. An optional artificial delay exercises the pipeline's
/// timeout, and `unreachable` simulates a connection-level failure.
pub struct MockTransport {
    status: u16,
    body: String,
    delay: Option<Duration>,
    connection_error: Option<String>,
    calls: AtomicUsize,
}

impl MockTransport {
    pub fn replying(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
            connection_error: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A transport whose every call fails at the connection level.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            body: String::new(),
            delay: None,
            connection_error: Some(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times `send` or `check` has been invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn reply(&self) -> Result<TransportReply, TransportFault> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.connection_error {
            return Err(TransportFault::Connection(message.clone()));
        }
        Ok(TransportReply {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

#[async_trait]
impl CompletionTransport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, _request: &ExtractionRequest) -> Result<TransportReply, TransportFault> {
        self.reply().await
    }
}

#[async_trait]
impl CredentialCheck for MockTransport {
    async fn check(&self, _credential: &Credential) -> Result<TransportReply, TransportFault> {
        self.reply().await
    }
}
