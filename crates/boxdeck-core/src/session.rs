//! The session entity shown in the dashboard

use boxdeck_provider::{ContainerId, ContainerRecord};

/// One distrobox session, as of a single inventory pass.
///
/// Sessions are never updated in place: a refresh builds a new list and the
/// old one is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: String,
    name: String,
    status: String,
    image: String,
}

impl Session {
    /// Build a session; `id` is shortened to 12 characters
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        status: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        let id = ContainerId::new(id);
        Self {
            id: id.short().to_string(),
            name: name.into(),
            status: status.into(),
            image: image.into(),
        }
    }

    /// Normalize a runtime record. Returns `None` for a record without a name.
    pub fn from_record(record: &ContainerRecord) -> Option<Self> {
        let name = record.name().filter(|n| !n.is_empty())?;
        Some(Self::new(
            record.id.short(),
            name,
            record.status.as_str(),
            record.image.as_str(),
        ))
    }

    /// Short container id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Session name, the key for every lifecycle action
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runtime status text, display only
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn image(&self) -> &str {
        &self.image
    }
}
