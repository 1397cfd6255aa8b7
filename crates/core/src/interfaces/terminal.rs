//! Terminal surface interface

use std::sync::mpsc::Receiver;

use crate::error::Result;

/// Notification that a terminal went away without being disposed by us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalClosed {
    pub name: String,
}

/// A host capable of creating named terminals and typing into them.
pub trait TerminalBackend {
    type Handle;

    /// Create a terminal with the given name.
    fn create(&mut self, name: &str) -> Result<Self::Handle>;

    /// Reveal the terminal. With `preserve_focus` the editor keeps focus.
    fn show(&mut self, handle: &mut Self::Handle, preserve_focus: bool) -> Result<()>;

    /// Type `text` into the terminal, optionally followed by a newline.
    fn send_text(&mut self, handle: &mut Self::Handle, text: &str, add_new_line: bool)
    -> Result<()>;

    /// Terminate the terminal.
    fn dispose(&mut self, handle: Self::Handle) -> Result<()>;

    /// Subscribe to close notifications for terminals created by this backend.
    fn subscribe_close(&mut self) -> Receiver<TerminalClosed>;
}
