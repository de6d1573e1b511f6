mod assistant;
mod gateway;
mod http;
mod mock;
pub mod parse;
mod traits;
mod wire;

pub use assistant::{Assistant, StackAdvice};
pub use gateway::{
    Completion, FallbackReason, GatewayConfig, GatewayMode, ModelGateway, DEFAULT_ENDPOINT,
    DEFAULT_MODEL, FALLBACK_ERROR, MISSING_CREDENTIAL, NO_RESPONSE,
};
pub use http::HttpTransport;
pub use mock::MockTransport;
pub use parse::{CatalogOutcome, CatalogSource};
pub use traits::{ChatTransport, GatewayError, TransportResponse};
pub use wire::{ChatRequest, ChatResponse};
