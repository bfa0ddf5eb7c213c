//! Container runtime discovery and listing for boxdeck
//!
//! This crate finds the installed runtime (podman or docker), and reads its
//! container listing into runtime-neutral [`ContainerRecord`]s regardless
//! of which output schema that runtime version speaks.

mod cli_runtime;
mod error;
mod locate;
mod parse;
mod types;

pub use cli_runtime::CliRuntime;
pub use error::*;
pub use locate::*;
pub use parse::{ResponseParser, DELIMITED_FORMAT};
pub use types::*;

use async_trait::async_trait;

/// Source of the host's full container list
#[async_trait]
pub trait ContainerQuery: Send + Sync {
    /// List every container, stopped ones included
    async fn list_all(&self) -> Result<Vec<ContainerRecord>>;
}

/// Locate the runtime and probe its listing format
pub async fn connect_default_runtime() -> Result<CliRuntime> {
    let runtime = locate_runtime().ok_or(ProviderError::RuntimeNotFound)?;
    tracing::info!("Using {} at {}", runtime.kind, runtime.path.display());
    CliRuntime::connect(runtime).await
}
