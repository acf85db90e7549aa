//! Interaction controller module
//!
//! The session state machine and its supporting types: configuration,
//! session state, lifecycle hooks, and the deferred command table.

mod config;
mod session;
mod hooks;
#[allow(clippy::module_inception)]
mod controller;

pub use config::InteractionConfig;
pub use session::{EndReason, Phase, Session};
pub use hooks::{Hook, HookEvent};
pub use controller::{Command, InteractionController};

use serde::Serialize;

/// Result of input handling
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputResult {
    /// Input was handled internally
    Handled,
    /// Input was not handled (pass through)
    Unhandled,
}

impl InputResult {
    /// Check if input was handled
    #[inline]
    pub fn is_handled(&self) -> bool {
        matches!(self, InputResult::Handled)
    }
}
