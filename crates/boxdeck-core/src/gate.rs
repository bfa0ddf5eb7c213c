//! Ordering between lifecycle actions and refreshes
//!
//! At most one action per session is outstanding, and an inventory refresh
//! never runs while an action is: a requested refresh is held until the last
//! in-flight action reports completion, then runs once.

use crate::{CoreError, ProcessFinished, ProcessSpec, Result};
use std::collections::HashSet;

/// Outcome of a refresh request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshDecision {
    /// Query the inventory now
    Now,
    /// Held until outstanding actions complete
    Deferred,
}

#[derive(Debug, Default)]
pub struct ActionGate {
    in_flight: HashSet<String>,
    refresh_pending: bool,
}

impl ActionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an action as started
    pub fn begin(&mut self, spec: &ProcessSpec) -> Result<()> {
        if !self.in_flight.insert(spec.session.clone()) {
            return Err(CoreError::ActionInFlight(spec.session.clone()));
        }
        Ok(())
    }

    pub fn request_refresh(&mut self) -> RefreshDecision {
        if self.in_flight.is_empty() {
            self.refresh_pending = false;
            RefreshDecision::Now
        } else {
            self.refresh_pending = true;
            RefreshDecision::Deferred
        }
    }

    /// Record a completion. Every completion asks for a refresh; returns
    /// true when that refresh should run now.
    pub fn finish(&mut self, finished: &ProcessFinished) -> bool {
        self.in_flight.remove(&finished.session);
        self.refresh_pending = true;
        if self.in_flight.is_empty() {
            self.refresh_pending = false;
            true
        } else {
            false
        }
    }

    pub fn is_busy(&self, session: &str) -> bool {
        self.in_flight.contains(session)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn refresh_pending(&self) -> bool {
        self.refresh_pending
    }
}
