//! run-in-terminal - Run the command configured for the current file
//!
//! This crate provides functionality to:
//! - Match the active file against configured or ad-hoc patterns
//! - Expand `${file}`, `${line}`, `${env.NAME}` and friends in command templates
//! - Keep one reusable terminal session and send commands to it
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod interfaces;
pub mod patterns;
pub mod terminal;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use command::{CommandResolver, Resolution, RuleSource, expand};
pub use config::{Config, JsonSettings, StaticConfig};
pub use dispatcher::{DispatchOutcome, Dispatcher, SessionState};
pub use interfaces::{ConfigSource, TerminalBackend, TerminalClosed, Workbench};
pub use patterns::PatternMatcher;
pub use terminal::{SESSION_NAME, ShellTerminal, TerminalManager};
