//! Common types for container runtimes

use std::collections::HashMap;
use std::path::PathBuf;

/// Container ID wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ContainerId(pub String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// First 12 characters, the form `ps` prints without `--no-trunc`.
    /// Ids shorter than that are returned unchanged.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(12) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContainerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Container runtime flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeKind {
    Podman,
    Docker,
}

impl RuntimeKind {
    /// Executable name looked up on PATH
    pub fn executable(&self) -> &'static str {
        match self {
            Self::Podman => "podman",
            Self::Docker => "docker",
        }
    }
}

impl std::fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.executable())
    }
}

/// A resolved runtime executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runtime {
    pub kind: RuntimeKind,
    pub path: PathBuf,
}

/// One container as reported by `ps -a`, before any filtering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerRecord {
    pub id: ContainerId,
    /// Declared names; the runtime may report several aliases
    pub names: Vec<String>,
    pub image: String,
    /// Free-text status, verbatim
    pub status: String,
    pub labels: HashMap<String, String>,
    /// Mount sources/destinations as listed by the runtime
    pub mounts: Vec<String>,
}

impl ContainerRecord {
    /// The primary name (first alias)
    pub fn name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }
}
