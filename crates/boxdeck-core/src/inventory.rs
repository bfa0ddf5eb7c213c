//! Session inventory: which containers belong to distrobox
//!
//! The runtime lists every container on the host. A container is a session
//! when it carries the distrobox export helper mount, or, when no container
//! on the host does, when it has the manager label. Mount evidence is
//! authoritative: once any record matches by mount, labels are ignored for
//! the whole pass.

use crate::{CoreError, Result, Session};
use boxdeck_config::InventoryConfig;
use boxdeck_provider::{ContainerQuery, ContainerRecord, ProviderError};
use std::sync::Arc;

/// Which signal selected the records of one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipSignal {
    Mount,
    Label,
    /// Neither signal matched anything
    None,
}

/// Ecosystem membership rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipPolicy {
    sentinel_mount: String,
    label_key: String,
    label_value: String,
}

impl Default for MembershipPolicy {
    fn default() -> Self {
        Self::from_config(&InventoryConfig::default())
    }
}

impl MembershipPolicy {
    pub fn new(
        sentinel_mount: impl Into<String>,
        label_key: impl Into<String>,
        label_value: impl Into<String>,
    ) -> Self {
        Self {
            sentinel_mount: sentinel_mount.into(),
            label_key: label_key.into(),
            label_value: label_value.into(),
        }
    }

    pub fn from_config(config: &InventoryConfig) -> Self {
        Self::new(
            config.sentinel_mount.as_str(),
            config.manager_label_key.as_str(),
            config.manager_label_value.as_str(),
        )
    }

    pub fn matches_mount(&self, record: &ContainerRecord) -> bool {
        record
            .mounts
            .iter()
            .any(|m| m.contains(self.sentinel_mount.as_str()))
    }

    pub fn matches_label(&self, record: &ContainerRecord) -> bool {
        record
            .labels
            .get(&self.label_key)
            .is_some_and(|v| *v == self.label_value)
    }

    /// Pick the member records, keeping response order
    pub fn select<'a>(
        &self,
        records: &'a [ContainerRecord],
    ) -> (MembershipSignal, Vec<&'a ContainerRecord>) {
        let by_mount: Vec<_> = records.iter().filter(|r| self.matches_mount(r)).collect();
        if !by_mount.is_empty() {
            return (MembershipSignal::Mount, by_mount);
        }

        let by_label: Vec<_> = records.iter().filter(|r| self.matches_label(r)).collect();
        if by_label.is_empty() {
            (MembershipSignal::None, by_label)
        } else {
            (MembershipSignal::Label, by_label)
        }
    }
}

/// Builds session snapshots from the runtime
#[derive(Clone)]
pub struct Inventory {
    query: Arc<dyn ContainerQuery>,
    policy: MembershipPolicy,
}

impl Inventory {
    pub fn new(query: Arc<dyn ContainerQuery>, policy: MembershipPolicy) -> Self {
        Self { query, policy }
    }

    /// Query the runtime and return the current sessions.
    ///
    /// Any malformed record fails the whole pass; there is no partial result.
    pub async fn snapshot(&self) -> Result<Vec<Session>> {
        let records = self.query.list_all().await?;
        let (signal, members) = self.policy.select(&records);
        tracing::debug!(
            "{} of {} containers are sessions (signal: {:?})",
            members.len(),
            records.len(),
            signal
        );
        normalize(members)
    }

    /// Every container the runtime reports, unfiltered
    pub async fn all(&self) -> Result<Vec<Session>> {
        let records = self.query.list_all().await?;
        normalize(records.iter())
    }
}

fn normalize<'a>(records: impl IntoIterator<Item = &'a ContainerRecord>) -> Result<Vec<Session>> {
    records
        .into_iter()
        .map(|record| {
            Session::from_record(record).ok_or_else(|| {
                CoreError::Provider(ProviderError::MalformedResponse(format!(
                    "container {} has no name",
                    record.id
                )))
            })
        })
        .collect()
}
