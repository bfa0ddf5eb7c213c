//! Test support utilities for boxdeck-core
//!
//! Provides a scriptable [`MockQuery`] and record builders so inventory and
//! dashboard code can be tested without a container runtime.

use async_trait::async_trait;
use boxdeck_provider::*;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Configurable container query
pub struct MockQuery {
    /// Result returned by `list_all` once `queued` is drained
    pub list_result: Mutex<Result<Vec<ContainerRecord>>>,
    /// One-shot results consumed in order before `list_result`
    pub queued: Mutex<VecDeque<Result<Vec<ContainerRecord>>>>,
    calls: AtomicUsize,
}

impl MockQuery {
    pub fn new() -> Self {
        Self {
            list_result: Mutex::new(Ok(Vec::new())),
            queued: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_records(records: Vec<ContainerRecord>) -> Self {
        let mock = Self::new();
        mock.set_records(records);
        mock
    }

    pub fn failing(error: ProviderError) -> Self {
        let mock = Self::new();
        *mock.list_result.lock().unwrap() = Err(error);
        mock
    }

    /// Replace the steady-state listing
    pub fn set_records(&self, records: Vec<ContainerRecord>) {
        *self.list_result.lock().unwrap() = Ok(records);
    }

    /// Queue a result for the next `list_all` call only
    pub fn push_result(&self, result: Result<Vec<ContainerRecord>>) {
        self.queued.lock().unwrap().push_back(result);
    }

    /// How many times `list_all` ran
    pub fn list_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContainerQuery for MockQuery {
    async fn list_all(&self) -> Result<Vec<ContainerRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(next) = self.queued.lock().unwrap().pop_front() {
            return next;
        }
        clone_result(&self.list_result.lock().unwrap())
    }
}

fn clone_result(r: &Result<Vec<ContainerRecord>>) -> Result<Vec<ContainerRecord>> {
    match r {
        Ok(v) => Ok(v.clone()),
        Err(e) => Err(clone_provider_error(e)),
    }
}

/// Clone a ProviderError (thiserror types don't implement Clone)
fn clone_provider_error(e: &ProviderError) -> ProviderError {
    match e {
        ProviderError::RuntimeNotFound => ProviderError::RuntimeNotFound,
        ProviderError::QueryFailed(s) => ProviderError::QueryFailed(s.clone()),
        ProviderError::MalformedResponse(s) => ProviderError::MalformedResponse(s.clone()),
        ProviderError::RuntimeError(s) => ProviderError::RuntimeError(s.clone()),
    }
}

/// A record with no membership evidence
pub fn plain_record(id: &str, name: &str) -> ContainerRecord {
    ContainerRecord {
        id: ContainerId::new(id),
        names: vec![name.to_string()],
        image: "registry.fedoraproject.org/fedora-toolbox:39".to_string(),
        status: "Up 2 hours".to_string(),
        labels: HashMap::new(),
        mounts: Vec::new(),
    }
}

/// A record carrying a mount entry
pub fn mount_record(id: &str, name: &str, mount: &str) -> ContainerRecord {
    ContainerRecord {
        mounts: vec!["/home/user:/home/user".to_string(), mount.to_string()],
        ..plain_record(id, name)
    }
}

/// A record carrying one label
pub fn label_record(id: &str, name: &str, key: &str, value: &str) -> ContainerRecord {
    ContainerRecord {
        labels: HashMap::from([(key.to_string(), value.to_string())]),
        ..plain_record(id, name)
    }
}
