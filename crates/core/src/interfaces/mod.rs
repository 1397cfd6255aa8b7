//! Host collaborator interfaces
//!
//! The core never talks to an editor, a terminal emulator or a settings store
//! directly. Hosts implement these traits; tests implement them in memory.

pub mod config_source;
pub mod terminal;
pub mod workbench;

pub use config_source::ConfigSource;
pub use terminal::{TerminalBackend, TerminalClosed};
pub use workbench::Workbench;
