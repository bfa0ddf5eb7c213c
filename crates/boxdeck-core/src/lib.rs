//! Core logic for boxdeck
//!
//! This crate provides:
//! - The session entity and the inventory that builds it from runtime state
//! - The lifecycle controller (enter, stop, remove, refresh)
//! - Subprocess execution and ordering for lifecycle actions

mod error;
mod gate;
mod inventory;
mod lifecycle;
pub mod runner;
mod session;

pub use error::*;
pub use gate::*;
pub use inventory::*;
pub use lifecycle::*;
pub use session::*;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
