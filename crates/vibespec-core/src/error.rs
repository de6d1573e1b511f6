use thiserror::Error;

#[derive(Debug, Error)]
pub enum VibespecError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
