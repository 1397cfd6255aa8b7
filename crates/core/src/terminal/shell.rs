//! A terminal backed by a long-lived shell process
//!
//! Commands are written to the shell's stdin; its output goes wherever this
//! process's output goes. When the shell exits on its own (for example after
//! the user runs `exit`), a close notification is sent so the next run starts
//! a new shell.

use std::io::Write;
use std::path::PathBuf;
use std::process::{ChildStdin, Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::debug;

use crate::{
    error::{Error, Result},
    interfaces::{TerminalBackend, TerminalClosed},
};

#[derive(Debug, Clone)]
pub struct ShellTerminal {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    closers: Vec<Sender<TerminalClosed>>,
}

#[derive(Debug)]
pub struct ShellSession {
    name: String,
    pid: u32,
    stdin: Option<ChildStdin>,
    disposed: Arc<AtomicBool>,
    waiter: Option<JoinHandle<()>>,
}

impl ShellSession {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }
}

impl Drop for ShellSession {
    fn drop(&mut self) {
        // a session we let go of must not report its shell's exit later
        self.disposed.store(true, Ordering::SeqCst);
    }
}

impl Default for ShellTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellTerminal {
    /// Uses `$SHELL` (falling back to `sh`), or `%COMSPEC%` on Windows.
    pub fn new() -> Self {
        Self::with_program(default_shell(), Vec::new())
    }

    pub fn with_program(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            current_dir: None,
            closers: Vec::new(),
        }
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

fn default_shell() -> String {
    let var = if cfg!(windows) { "COMSPEC" } else { "SHELL" };
    std::env::var(var)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| if cfg!(windows) { "cmd" } else { "sh" }.to_string())
}

impl TerminalBackend for ShellTerminal {
    type Handle = ShellSession;

    fn create(&mut self, name: &str) -> Result<ShellSession> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).stdin(Stdio::piped());
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        let mut child = command
            .spawn()
            .map_err(|e| Error::TerminalError(format!("Failed to start {}: {e}", self.program)))?;
        let pid = child.id();
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::TerminalError(format!("{} has no stdin", self.program)))?;
        debug!("Started {} (pid {}) for terminal {:?}", self.program, pid, name);

        let disposed = Arc::new(AtomicBool::new(false));
        let waiter = {
            let disposed = Arc::clone(&disposed);
            let closers = self.closers.clone();
            let name = name.to_string();
            thread::Builder::new()
                .name(format!("{name}-wait"))
                .spawn(move || {
                    let status = child.wait();
                    debug!("Shell for {:?} exited: {:?}", name, status);
                    if !disposed.load(Ordering::SeqCst) {
                        for closer in &closers {
                            let _ = closer.send(TerminalClosed { name: name.clone() });
                        }
                    }
                })?
        };

        Ok(ShellSession {
            name: name.to_string(),
            pid,
            stdin: Some(stdin),
            disposed,
            waiter: Some(waiter),
        })
    }

    fn show(&mut self, handle: &mut ShellSession, _preserve_focus: bool) -> Result<()> {
        debug!("Terminal {:?} shares this process's output", handle.name);
        Ok(())
    }

    fn send_text(
        &mut self,
        handle: &mut ShellSession,
        text: &str,
        add_new_line: bool,
    ) -> Result<()> {
        let stdin = handle
            .stdin
            .as_mut()
            .ok_or_else(|| Error::TerminalError(format!("terminal {:?} is closed", handle.name)))?;
        stdin.write_all(text.as_bytes())?;
        if add_new_line {
            stdin.write_all(b"\n")?;
        }
        stdin.flush()?;
        Ok(())
    }

    /// Closes the shell's input and waits for it to finish what was sent.
    fn dispose(&mut self, mut handle: ShellSession) -> Result<()> {
        handle.disposed.store(true, Ordering::SeqCst);
        drop(handle.stdin.take());
        if let Some(waiter) = handle.waiter.take() {
            waiter.join().map_err(|_| {
                Error::TerminalError(format!("waiting for terminal {:?} failed", handle.name))
            })?;
        }
        Ok(())
    }

    fn subscribe_close(&mut self) -> Receiver<TerminalClosed> {
        let (tx, rx) = mpsc::channel();
        self.closers.push(tx);
        rx
    }
}
