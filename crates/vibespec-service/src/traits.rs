use async_trait::async_trait;
use thiserror::Error;

use crate::wire::ChatRequest;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Raw reply from the provider or relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One outbound chat-completion call.
///
/// `HttpTransport` talks to the provider or a relay over HTTP.
/// `MockTransport` records requests and replays canned replies.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Name for logging.
    fn name(&self) -> &str;

    async fn post(&self, request: &ChatRequest) -> Result<TransportResponse, GatewayError>;
}
