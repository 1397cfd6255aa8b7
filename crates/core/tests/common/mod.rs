//! Host doubles shared by the integration tests

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};

use run_in_terminal_core::{Result, TerminalBackend, TerminalClosed, Workbench};

/// Workbench with a fixed workspace root that records what it was asked to do.
#[derive(Debug, Default)]
pub struct TestWorkbench {
    pub root: Option<PathBuf>,
    pub errors: Vec<String>,
    pub saves: usize,
}

impl TestWorkbench {
    pub fn rooted(root: &Path) -> Self {
        Self {
            root: Some(root.to_path_buf()),
            ..Default::default()
        }
    }
}

impl Workbench for TestWorkbench {
    fn save_all(&mut self) -> Result<bool> {
        self.saves += 1;
        Ok(true)
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn workspace_root(&self, _file: &Path) -> Option<PathBuf> {
        self.root.clone()
    }
}

#[derive(Debug, Default)]
struct TerminalLog {
    created: usize,
    sent: Vec<(usize, String)>,
    closers: Vec<Sender<TerminalClosed>>,
}

/// In-memory terminal. Clones share state, so a test keeps one clone to
/// inspect what the dispatcher sent and to close terminals "by hand".
#[derive(Debug, Clone, Default)]
pub struct MemoryTerminal {
    log: Rc<RefCell<TerminalLog>>,
}

impl MemoryTerminal {
    pub fn created(&self) -> usize {
        self.log.borrow().created
    }

    /// Sent text, tagged with the number of the terminal it went to.
    pub fn sent(&self) -> Vec<(usize, String)> {
        self.log.borrow().sent.clone()
    }

    /// The user closes the terminal called `name`.
    pub fn close(&self, name: &str) {
        for closer in &self.log.borrow().closers {
            let _ = closer.send(TerminalClosed {
                name: name.to_string(),
            });
        }
    }
}

impl TerminalBackend for MemoryTerminal {
    type Handle = usize;

    fn create(&mut self, _name: &str) -> Result<usize> {
        let mut log = self.log.borrow_mut();
        log.created += 1;
        Ok(log.created)
    }

    fn show(&mut self, _handle: &mut usize, _preserve_focus: bool) -> Result<()> {
        Ok(())
    }

    fn send_text(&mut self, handle: &mut usize, text: &str, _add_new_line: bool) -> Result<()> {
        self.log.borrow_mut().sent.push((*handle, text.to_string()));
        Ok(())
    }

    fn dispose(&mut self, _handle: usize) -> Result<()> {
        Ok(())
    }

    fn subscribe_close(&mut self) -> Receiver<TerminalClosed> {
        let (tx, rx) = mpsc::channel();
        self.log.borrow_mut().closers.push(tx);
        rx
    }
}
