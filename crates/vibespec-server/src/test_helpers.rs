use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

use crate::config::ServerConfig;

/// A running test server with base_url and background task handle.
pub struct TestServer {
    pub base_url: String,
    _handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

async fn spawn_router(app: Router) -> (String, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), handle)
}

/// Spawn the relay on a random port with `config`.
pub async fn spawn_test_server(config: ServerConfig) -> TestServer {
    let app = crate::routes::build_router(crate::routes::app_state(config));
    let (base_url, handle) = spawn_router(app).await;
    TestServer {
        base_url,
        _handle: handle,
    }
}

/// What the fake provider saw for one request.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

/// A stand-in chat-completion provider that records requests and answers
/// every one with the same status and JSON body.
pub struct FakeProvider {
    pub url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl FakeProvider {
    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

async fn completions(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.seen.lock().unwrap().push(SeenRequest {
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
        body,
    });
    (state.status, Json(state.reply.clone()))
}

pub async fn spawn_fake_provider(status: u16, reply: Value) -> FakeProvider {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = FakeState {
        status: StatusCode::from_u16(status).unwrap(),
        reply,
        seen: seen.clone(),
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(state);
    let (base_url, handle) = spawn_router(app).await;
    FakeProvider {
        url: format!("{base_url}/v1/chat/completions"),
        seen,
        _handle: handle,
    }
}
