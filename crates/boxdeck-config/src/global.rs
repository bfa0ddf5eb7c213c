//! Global configuration for boxdeck
//!
//! Located at `~/.config/boxdeck/config.toml`. Every key is optional; a
//! missing file means all defaults.

use crate::{ConfigError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Global boxdeck configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub inventory: InventoryConfig,
    pub lifecycle: LifecycleConfig,
    pub ui: UiConfig,
}

/// How containers are recognised as distrobox sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Fragment matched against each mount entry of a container.
    /// distrobox bind-mounts its export helper into every box it creates,
    /// but the exact path has moved between releases.
    pub sentinel_mount: String,
    /// Label key checked when no container matches the mount sentinel
    pub manager_label_key: String,
    /// Expected value of `manager_label_key`
    pub manager_label_value: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            sentinel_mount: "/distrobox-export".to_string(),
            manager_label_key: "manager".to_string(),
            manager_label_value: "distrobox".to_string(),
        }
    }
}

/// Lifecycle command settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Executable used for enter/stop/rm (resolved through PATH)
    pub wrapper: String,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            wrapper: "distrobox".to_string(),
        }
    }
}

/// Dashboard appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: ThemeName,
    /// Rows per table page
    pub page_size: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeName::Mocha,
            page_size: 5,
        }
    }
}

/// Built-in color palettes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Catppuccin Latte, for light terminals
    Latte,
    /// Catppuccin Mocha, for dark terminals
    #[default]
    Mocha,
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeName::Latte => write!(f, "latte"),
            ThemeName::Mocha => write!(f, "mocha"),
        }
    }
}

impl GlobalConfig {
    /// Load global configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;

        tracing::debug!(
            "Loaded config from {:?}: sentinel={:?}, wrapper={:?}",
            path,
            config.inventory.sentinel_mount,
            config.lifecycle.wrapper
        );

        Ok(config)
    }

    /// Reject values that would make the dashboard silently useless
    pub fn validate(&self) -> Result<()> {
        if self.inventory.sentinel_mount.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "inventory.sentinel_mount must not be empty".to_string(),
            ));
        }
        if self.inventory.manager_label_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "inventory.manager_label_key must not be empty".to_string(),
            ));
        }
        if self.lifecycle.wrapper.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "lifecycle.wrapper must not be empty".to_string(),
            ));
        }
        if self.ui.page_size == 0 {
            return Err(ConfigError::Invalid(
                "ui.page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "boxdeck").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}
