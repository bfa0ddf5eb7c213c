//! Configuration loading for boxdeck
//!
//! This crate handles the global configuration file
//! (`~/.config/boxdeck/config.toml`): which containers count as sessions,
//! which wrapper drives lifecycle actions, and how the dashboard looks.

mod error;
mod global;

pub use error::*;
pub use global::*;
