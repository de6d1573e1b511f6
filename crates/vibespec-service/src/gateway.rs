use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, warn};
use vibespec_core::{AssistTask, ChatMessage};

use crate::http::HttpTransport;
use crate::traits::{ChatTransport, GatewayError};
use crate::wire::{ChatRequest, ChatResponse};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4";

pub const FALLBACK_ERROR: &str = "Sorry, I encountered an error. Please try again.";
pub const NO_RESPONSE: &str = "No response generated";
pub const MISSING_CREDENTIAL: &str =
    "Please add your OpenAI API key (OPENAI_API_KEY) to enable AI assistance.";

/// Where calls go and who holds the credential.
#[derive(Clone, PartialEq, Eq)]
pub enum GatewayMode {
    /// Call the provider directly with a client-held credential.
    Direct { api_key: Option<String> },
    /// Call a relay that attaches the credential server-side.
    Relay,
}

impl fmt::Debug for GatewayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayMode::Direct { api_key } => f
                .debug_struct("Direct")
                .field("api_key", &api_key.as_ref().map(|_| "<redacted>"))
                .finish(),
            GatewayMode::Relay => f.write_str("Relay"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub mode: GatewayMode,
    pub endpoint: String,
    pub model: String,
}

impl GatewayConfig {
    pub fn direct(api_key: Option<String>) -> Self {
        Self {
            mode: GatewayMode::Direct {
                api_key: api_key.filter(|k| !k.trim().is_empty()),
            },
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn relay(url: &str) -> Self {
        Self {
            mode: GatewayMode::Relay,
            endpoint: url.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// False only in direct mode without a credential.
    pub fn is_usable(&self) -> bool {
        match &self.mode {
            GatewayMode::Direct { api_key } => api_key.is_some(),
            GatewayMode::Relay => true,
        }
    }

    fn build_transport(&self) -> HttpTransport {
        match &self.mode {
            GatewayMode::Direct { api_key: Some(key) } => {
                HttpTransport::with_api_key(&self.endpoint, key.clone())
            }
            _ => HttpTransport::new(&self.endpoint),
        }
    }
}

/// Why a call produced no generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    MissingCredential,
    Transport(String),
    Status(u16),
    Malformed(String),
    Empty,
}

impl FallbackReason {
    /// The user-visible text this reason collapses to.
    pub fn message(&self) -> &'static str {
        match self {
            FallbackReason::MissingCredential => MISSING_CREDENTIAL,
            FallbackReason::Empty => NO_RESPONSE,
            FallbackReason::Transport(_)
            | FallbackReason::Status(_)
            | FallbackReason::Malformed(_) => FALLBACK_ERROR,
        }
    }
}

impl From<GatewayError> for FallbackReason {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Transport(msg) => FallbackReason::Transport(msg),
            GatewayError::Status { status, .. } => FallbackReason::Status(status),
            GatewayError::Malformed(msg) => FallbackReason::Malformed(msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Text(String),
    Fallback(FallbackReason),
}

impl Completion {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Completion::Fallback(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Completion::Text(t) => Some(t),
            Completion::Fallback(_) => None,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Completion::Text(t) => t,
            Completion::Fallback(reason) => reason.message().to_string(),
        }
    }
}

/// Single point through which every model call passes.
///
/// Makes exactly one attempt per call. Failures never escape as errors:
/// [`ModelGateway::complete_outcome`] reports them as
/// [`Completion::Fallback`] and [`ModelGateway::complete`] collapses that to
/// the fixed user-facing text.
#[derive(Clone)]
pub struct ModelGateway {
    config: GatewayConfig,
    transport: Arc<dyn ChatTransport>,
}

impl ModelGateway {
    pub fn new(config: GatewayConfig) -> Self {
        let transport = Arc::new(config.build_transport());
        Self::with_transport(config, transport)
    }

    pub fn with_transport(config: GatewayConfig, transport: Arc<dyn ChatTransport>) -> Self {
        if !config.is_usable() {
            warn!("model provider credential not found; set OPENAI_API_KEY to enable AI assistance");
        }
        Self { config, transport }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn request_for(&self, messages: Vec<ChatMessage>, task: AssistTask) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: task.max_tokens(),
            temperature: task.temperature(),
        }
    }

    pub async fn complete_outcome(&self, messages: Vec<ChatMessage>, task: AssistTask) -> Completion {
        if !self.config.is_usable() {
            return Completion::Fallback(FallbackReason::MissingCredential);
        }

        let request = self.request_for(messages, task);
        debug!(
            task = %task,
            transport = self.transport.name(),
            max_tokens = request.max_tokens,
            "sending completion request"
        );

        match self.send(&request).await {
            Ok(Some(text)) => Completion::Text(text),
            Ok(None) => Completion::Fallback(FallbackReason::Empty),
            Err(e) => {
                error!(task = %task, "completion failed: {e}");
                Completion::Fallback(e.into())
            }
        }
    }

    pub async fn complete(&self, messages: Vec<ChatMessage>, task: AssistTask) -> String {
        self.complete_outcome(messages, task).await.into_text()
    }

    async fn send(&self, request: &ChatRequest) -> Result<Option<String>, GatewayError> {
        let resp = self.transport.post(request).await?;
        if !resp.is_success() {
            return Err(GatewayError::Status {
                status: resp.status,
                message: error_message(&resp.body),
            });
        }
        let parsed: ChatResponse = serde_json::from_str(&resp.body)
            .map_err(|e| GatewayError::Malformed(format!("json decode: {e}")))?;
        Ok(parsed.first_text().map(String::from))
    }
}

/// Pull a readable message out of an error body: `{"error":"..."}` from the
/// relay or `{"error":{"message":"..."}}` from the provider.
fn error_message(body: &str) -> String {
    let value = serde_json::from_str::<serde_json::Value>(body).ok();
    value
        .as_ref()
        .and_then(|v| {
            v["error"]
                .as_str()
                .or_else(|| v["error"]["message"].as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}
