//! Error types for boxdeck-core

use crate::LifecycleVerb;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{0}")]
    Provider(#[from] boxdeck_provider::ProviderError),

    #[error("'{0}' needs a session name")]
    MissingSession(LifecycleVerb),

    #[error("An action on '{0}' is still running")]
    ActionInFlight(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
