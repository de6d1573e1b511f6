use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::routing::any;
use axum::{Json, Router};
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};
use tracing::{debug, error};

use super::AppState;

type Reply = (StatusCode, Json<Value>);

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/chat", any(chat))
}

fn err(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "error": message })))
}

/// Forward the body verbatim to the provider with the server-held
/// credential, then relay the provider's status and JSON body.
async fn chat(State(state): State<AppState>, method: Method, body: Bytes) -> Reply {
    if method != Method::POST {
        return err(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }

    let Some(api_key) = state.config.credential() else {
        return err(
            StatusCode::INTERNAL_SERVER_ERROR,
            "OpenAI API key not configured on server",
        );
    };

    match forward(&state, api_key, body).await {
        Ok(reply) => reply,
        Err(e) => {
            error!("error calling upstream provider: {e}");
            err(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch from OpenAI")
        }
    }
}

async fn forward(state: &AppState, api_key: &str, body: Bytes) -> Result<Reply, reqwest::Error> {
    let resp = state
        .client
        .post(&state.config.upstream_url)
        .header(CONTENT_TYPE, "application/json")
        .bearer_auth(api_key)
        .body(body)
        .send()
        .await?;

    let status =
        StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let data: Value = resp.json().await?;
    debug!("upstream answered {status}");
    Ok((status, Json(data)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::routes::{app_state, build_router};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn router(api_key: Option<&str>) -> Router {
        // Nothing listens on port 1, so any forward fails at connect.
        build_router(app_state(ServerConfig::local("http://127.0.0.1:1/v1", api_key)))
    }

    async fn send(app: Router, method: Method) -> (StatusCode, Value) {
        let resp = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/api/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"model":"gpt-4","messages":[]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn non_post_is_rejected() {
        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let (status, body) = send(router(Some("sk-test")), method).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(body["error"], "Method not allowed");
        }
    }

    #[tokio::test]
    async fn missing_credential_is_server_error() {
        let (status, body) = send(router(None), Method::POST).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "OpenAI API key not configured on server");
    }

    #[tokio::test]
    async fn method_checked_before_credential() {
        let (status, _) = send(router(None), Method::GET).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn unreachable_upstream_is_fetch_failure() {
        let (status, body) = send(router(Some("sk-test")), Method::POST).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch from OpenAI");
    }
}
