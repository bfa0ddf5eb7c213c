//! Error types for container runtimes

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Missing dependency: we need a container manager. Please install one of podman or docker.")]
    RuntimeNotFound,

    #[error("Container listing failed: {0}")]
    QueryFailed(String),

    #[error("Malformed container listing: {0}")]
    MalformedResponse(String),

    #[error("Container runtime error: {0}")]
    RuntimeError(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
