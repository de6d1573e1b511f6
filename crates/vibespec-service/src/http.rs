use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use crate::traits::{ChatTransport, GatewayError, TransportResponse};
use crate::wire::ChatRequest;

/// reqwest-backed transport. Attaches a bearer credential when one is given
/// (direct mode); relay mode sends none.
pub struct HttpTransport {
    endpoint: String,
    client: Client,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            client: Client::new(),
            api_key: None,
        }
    }

    pub fn with_api_key(endpoint: &str, key: String) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            client: Client::new(),
            api_key: Some(key),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("Authorization", format!("Bearer {key}")),
            None => builder,
        }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn post(&self, request: &ChatRequest) -> Result<TransportResponse, GatewayError> {
        let builder = self.client.post(&self.endpoint).json(request);
        let resp = self
            .with_auth(builder)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| GatewayError::Transport(format!("read body: {e}")))?;
        Ok(TransportResponse { status, body })
    }
}
