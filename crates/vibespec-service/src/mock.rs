use std::sync::Mutex;

use async_trait::async_trait;

use crate::traits::{ChatTransport, GatewayError, TransportResponse};
use crate::wire::ChatRequest;

#[derive(Debug, Clone)]
enum MockReply {
    Response(TransportResponse),
    Error(String),
}

impl MockReply {
    fn completion(text: &str) -> Self {
        let body = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": text } }]
        });
        MockReply::Response(TransportResponse {
            status: 200,
            body: body.to_string(),
        })
    }
}

/// A transport for tests that records every request and replays canned
/// replies without touching the network.
///
/// Replies can be routed by a substring of the last message so a single mock
/// can answer several different prompts. Later routes take precedence.
pub struct MockTransport {
    default: MockReply,
    routes: Vec<(String, MockReply)>,
    calls: Mutex<Vec<ChatRequest>>,
}

impl MockTransport {
    fn with_default(default: MockReply) -> Self {
        Self {
            default,
            routes: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Reply 200 with a chat completion carrying `text`.
    pub fn completion(text: &str) -> Self {
        Self::with_default(MockReply::completion(text))
    }

    /// Reply with an arbitrary status and raw body.
    pub fn status(status: u16, body: &str) -> Self {
        Self::with_default(MockReply::Response(TransportResponse {
            status,
            body: body.to_string(),
        }))
    }

    /// Fail every call at the transport level.
    pub fn failure(message: &str) -> Self {
        Self::with_default(MockReply::Error(message.to_string()))
    }

    /// Answer prompts whose last message contains `needle` with `text`.
    pub fn route_completion(mut self, needle: &str, text: &str) -> Self {
        self.routes
            .push((needle.to_string(), MockReply::completion(text)));
        self
    }

    /// Answer prompts whose last message contains `needle` with a raw reply.
    pub fn route_status(mut self, needle: &str, status: u16, body: &str) -> Self {
        self.routes.push((
            needle.to_string(),
            MockReply::Response(TransportResponse {
                status,
                body: body.to_string(),
            }),
        ));
        self
    }

    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    fn reply_for(&self, request: &ChatRequest) -> &MockReply {
        let last = request
            .messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or("");
        self.routes
            .iter()
            .rev()
            .find(|(needle, _)| last.contains(needle.as_str()))
            .map(|(_, reply)| reply)
            .unwrap_or(&self.default)
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn post(&self, request: &ChatRequest) -> Result<TransportResponse, GatewayError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }
        match self.reply_for(request) {
            MockReply::Response(resp) => Ok(resp.clone()),
            MockReply::Error(msg) => Err(GatewayError::Transport(msg.clone())),
        }
    }
}
