pub mod chat;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

use crate::config::ServerConfig;

pub struct InnerAppState {
    pub config: ServerConfig,
    pub client: reqwest::Client,
}

pub type AppState = Arc<InnerAppState>;

pub fn app_state(config: ServerConfig) -> AppState {
    Arc::new(InnerAppState {
        config,
        client: reqwest::Client::new(),
    })
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);
    let router = Router::new()
        .route("/api/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .merge(chat::routes())
        .with_state(state);

    match cors {
        Some(layer) => router.layer(layer),
        None => router,
    }
}

/// No layer at all when no origins are configured, so browsers keep the
/// relay same-origin.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("ignoring invalid allowed origin {o:?}");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
