//! The single reusable terminal session

pub mod shell;

use std::sync::mpsc::Receiver;
use tracing::debug;

use crate::{
    error::Result,
    interfaces::{TerminalBackend, TerminalClosed},
};

pub use shell::{ShellSession, ShellTerminal};

/// Name of the terminal this crate creates and reuses.
pub const SESSION_NAME: &str = "run-in-terminal";

/// Owns at most one live terminal, created on demand.
///
/// The session is absent until [`ensure`](Self::ensure) creates it, and
/// becomes absent again after [`dispose`](Self::dispose) or when the backend
/// reports that a terminal with our name was closed.
pub struct TerminalManager<B: TerminalBackend> {
    backend: B,
    name: String,
    session: Option<B::Handle>,
    closed: Option<Receiver<TerminalClosed>>,
}

impl<B: TerminalBackend> TerminalManager<B> {
    pub fn new(backend: B) -> Self {
        Self::with_name(backend, SESSION_NAME)
    }

    pub fn with_name(backend: B, name: impl Into<String>) -> Self {
        Self {
            backend,
            name: name.into(),
            session: None,
            closed: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether a session is currently tracked, after applying close events.
    pub fn is_live(&mut self) -> bool {
        self.drain_close_events();
        self.session.is_some()
    }

    /// Return the live session, creating and revealing one if needed.
    pub fn ensure(&mut self) -> Result<&mut B::Handle> {
        self.drain_close_events();

        let handle = match self.session.take() {
            Some(handle) => handle,
            None => {
                if self.closed.is_none() {
                    self.closed = Some(self.backend.subscribe_close());
                }
                debug!("Creating terminal {:?}", self.name);
                let mut handle = self.backend.create(&self.name)?;
                self.backend.show(&mut handle, true)?;
                handle
            }
        };

        Ok(self.session.insert(handle))
    }

    /// Type `command` into the session and press enter.
    pub fn run(&mut self, command: &str) -> Result<()> {
        debug!("Running {:?} in {:?}", command, self.name);
        self.ensure()?;
        let Some(handle) = self.session.as_mut() else {
            return Ok(());
        };
        if let Err(e) = self.backend.send_text(handle, command, true) {
            // the session is unusable; the next run starts a fresh one
            self.discard();
            return Err(e);
        }
        Ok(())
    }

    /// Terminate the session if there is one.
    pub fn dispose(&mut self) -> Result<()> {
        if let Some(handle) = self.session.take() {
            debug!("Disposing terminal {:?}", self.name);
            self.backend.dispose(handle)?;
        }
        Ok(())
    }

    fn drain_close_events(&mut self) {
        let Some(closed) = &self.closed else {
            return;
        };
        let mut was_closed = false;
        while let Ok(event) = closed.try_recv() {
            was_closed |= event.name == self.name;
        }
        if was_closed && self.session.is_some() {
            debug!("Terminal {:?} was closed", self.name);
            self.discard();
        }
    }

    /// Forget the session, letting the backend release it.
    fn discard(&mut self) {
        if let Some(handle) = self.session.take() {
            if let Err(e) = self.backend.dispose(handle) {
                debug!("Releasing terminal {:?} failed: {e}", self.name);
            }
        }
    }
}
