//! Runtime discovery
//!
//! podman and docker expose the same `ps`/`exec` surface, so whichever is
//! installed will do. podman is preferred when both are present because
//! distrobox itself prefers it.

use crate::{Runtime, RuntimeKind};
use std::path::PathBuf;

/// Candidates in priority order
pub const RUNTIME_CANDIDATES: [RuntimeKind; 2] = [RuntimeKind::Podman, RuntimeKind::Docker];

/// Find the container runtime on PATH.
///
/// Returns `None` when neither candidate is installed; callers treat that
/// as fatal.
pub fn locate_runtime() -> Option<Runtime> {
    locate_runtime_with(|name| which::which(name).ok())
}

/// Find the container runtime using a custom executable probe
pub fn locate_runtime_with<F>(probe: F) -> Option<Runtime>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    for kind in RUNTIME_CANDIDATES {
        if let Some(path) = probe(kind.executable()) {
            tracing::debug!("Found {} at {}", kind, path.display());
            return Some(Runtime { kind, path });
        }
        tracing::debug!("{} not found on PATH", kind);
    }
    None
}
