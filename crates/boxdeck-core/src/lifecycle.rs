//! Lifecycle controller
//!
//! Maps a verb and a session name to one [`Deferred`] unit of work. The
//! controller never runs anything itself: the caller that owns the terminal
//! decides how and when each variant executes.

use crate::{CoreError, Result};
use std::fmt;

/// Lifecycle actions offered on a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleVerb {
    Enter,
    Stop,
    Remove,
    Refresh,
}

impl LifecycleVerb {
    pub fn needs_session(&self) -> bool {
        !matches!(self, Self::Refresh)
    }

    /// Present participle for status messages
    pub fn progressive(&self) -> &'static str {
        match self {
            Self::Enter => "Entering",
            Self::Stop => "Stopping",
            Self::Remove => "Removing",
            Self::Refresh => "Refreshing",
        }
    }
}

impl fmt::Display for LifecycleVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Enter => "enter",
            Self::Stop => "stop",
            Self::Remove => "remove",
            Self::Refresh => "refresh",
        };
        write!(f, "{}", s)
    }
}

/// How a child process is attached to the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// stdin, stdout and stderr inherited; the child owns the terminal
    Inherit,
    /// stdin closed, stdout discarded, stderr captured for diagnostics
    Discard,
}

/// A fully resolved command line for one lifecycle action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub verb: LifecycleVerb,
    pub session: String,
    pub program: String,
    pub args: Vec<String>,
    pub output: OutputMode,
}

impl ProcessSpec {
    /// Shell-quoted command line, for logs and status messages
    pub fn command_line(&self) -> String {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(self.program.as_str());
        words.extend(self.args.iter().map(String::as_str));
        shell_words::join(words)
    }
}

/// Unit of work returned for every lifecycle request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    /// Nothing to do
    Continue,
    /// Discard the snapshot and query the inventory again
    Refresh,
    /// Release the terminal, run the child in the foreground, take it back
    SuspendForProcess(ProcessSpec),
    /// Run the child in the background and report through [`ProcessFinished`]
    RunDetached(ProcessSpec),
}

impl Deferred {
    pub fn process(&self) -> Option<&ProcessSpec> {
        match self {
            Self::SuspendForProcess(spec) | Self::RunDetached(spec) => Some(spec),
            Self::Continue | Self::Refresh => None,
        }
    }
}

/// Completion report shared by every subprocess action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessFinished {
    pub verb: LifecycleVerb,
    pub session: String,
    /// `None` on success
    pub error: Option<String>,
}

impl ProcessFinished {
    pub fn success(spec: &ProcessSpec) -> Self {
        Self {
            verb: spec.verb,
            session: spec.session.clone(),
            error: None,
        }
    }

    pub fn failure(spec: &ProcessSpec, error: impl Into<String>) -> Self {
        Self {
            verb: spec.verb,
            session: spec.session.clone(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Builds wrapper invocations for lifecycle verbs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleController {
    wrapper: String,
}

impl Default for LifecycleController {
    fn default() -> Self {
        Self::new("distrobox")
    }
}

impl LifecycleController {
    pub fn new(wrapper: impl Into<String>) -> Self {
        Self {
            wrapper: wrapper.into(),
        }
    }

    /// `<wrapper> enter <name>` in the foreground
    pub fn enter(&self, name: &str) -> Deferred {
        Deferred::SuspendForProcess(self.spec(
            LifecycleVerb::Enter,
            name,
            &["enter", name],
            OutputMode::Inherit,
        ))
    }

    /// `<wrapper> stop <name> --yes` in the background
    pub fn stop(&self, name: &str) -> Deferred {
        Deferred::RunDetached(self.spec(
            LifecycleVerb::Stop,
            name,
            &["stop", name, "--yes"],
            OutputMode::Discard,
        ))
    }

    /// `<wrapper> rm <name> --force` in the background, running or not
    pub fn remove(&self, name: &str) -> Deferred {
        Deferred::RunDetached(self.spec(
            LifecycleVerb::Remove,
            name,
            &["rm", name, "--force"],
            OutputMode::Discard,
        ))
    }

    pub fn refresh(&self) -> Deferred {
        Deferred::Refresh
    }

    /// Resolve a verb chosen at runtime
    pub fn dispatch(&self, verb: LifecycleVerb, session: Option<&str>) -> Result<Deferred> {
        if verb == LifecycleVerb::Refresh {
            return Ok(self.refresh());
        }

        let name = session
            .filter(|s| !s.is_empty())
            .ok_or(CoreError::MissingSession(verb))?;

        Ok(match verb {
            LifecycleVerb::Enter => self.enter(name),
            LifecycleVerb::Stop => self.stop(name),
            LifecycleVerb::Remove => self.remove(name),
            LifecycleVerb::Refresh => self.refresh(),
        })
    }

    fn spec(&self, verb: LifecycleVerb, name: &str, args: &[&str], output: OutputMode) -> ProcessSpec {
        ProcessSpec {
            verb,
            session: name.to_string(),
            program: self.wrapper.clone(),
            args: args.iter().map(|a| a.to_string()).collect(),
            output,
        }
    }
}
