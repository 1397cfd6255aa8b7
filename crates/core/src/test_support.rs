//! In-memory host doubles shared by the unit tests

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::{
    error::{Error, Result},
    interfaces::{TerminalBackend, TerminalClosed, Workbench},
};

/// Ordered log of host calls, shared between doubles.
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

#[derive(Debug, Default)]
pub struct RecordingWorkbench {
    pub errors: Vec<String>,
    pub saves: usize,
    pub fail_save: bool,
    pub root: Option<PathBuf>,
    pub journal: Journal,
}

impl Workbench for RecordingWorkbench {
    fn save_all(&mut self) -> Result<bool> {
        self.saves += 1;
        self.journal.push("save");
        if self.fail_save {
            return Err(Error::Other("disk full".to_string()));
        }
        Ok(true)
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn workspace_root(&self, _file: &Path) -> Option<PathBuf> {
        self.root.clone()
    }
}

#[derive(Debug)]
pub struct FakeHandle {
    pub id: usize,
}

#[derive(Debug, Default)]
struct FakeState {
    created: usize,
    fail_send: bool,
    closers: Vec<Sender<TerminalClosed>>,
}

/// Terminal double. Clones share state so a test can keep a handle on the
/// backend after moving it into a manager.
#[derive(Debug, Clone, Default)]
pub struct FakeTerminal {
    pub journal: Journal,
    state: Rc<RefCell<FakeState>>,
}

impl FakeTerminal {
    pub fn with_journal(journal: Journal) -> Self {
        Self {
            journal,
            state: Rc::default(),
        }
    }

    pub fn created(&self) -> usize {
        self.state.borrow().created
    }

    pub fn subscriptions(&self) -> usize {
        self.state.borrow().closers.len()
    }

    /// Simulate the user closing a terminal.
    pub fn close_externally(&self, name: &str) {
        for closer in &self.state.borrow().closers {
            let _ = closer.send(TerminalClosed {
                name: name.to_string(),
            });
        }
    }

    /// Make the next `send_text` fail.
    pub fn fail_next_send(&self) {
        self.state.borrow_mut().fail_send = true;
    }

    pub fn sent(&self) -> Vec<String> {
        self.journal
            .entries()
            .into_iter()
            .filter_map(|e| e.split_once(": ").map(|(_, text)| text.to_string()))
            .collect()
    }
}

impl TerminalBackend for FakeTerminal {
    type Handle = FakeHandle;

    fn create(&mut self, name: &str) -> Result<FakeHandle> {
        let mut state = self.state.borrow_mut();
        state.created += 1;
        self.journal.push(format!("create {name} #{}", state.created));
        Ok(FakeHandle { id: state.created })
    }

    fn show(&mut self, handle: &mut FakeHandle, preserve_focus: bool) -> Result<()> {
        self.journal
            .push(format!("show #{} preserve_focus={preserve_focus}", handle.id));
        Ok(())
    }

    fn send_text(&mut self, handle: &mut FakeHandle, text: &str, add_new_line: bool) -> Result<()> {
        if std::mem::take(&mut self.state.borrow_mut().fail_send) {
            return Err(Error::TerminalError("broken pipe".to_string()));
        }
        let suffix = if add_new_line { "" } else { " (no newline)" };
        self.journal
            .push(format!("send #{}: {text}{suffix}", handle.id));
        Ok(())
    }

    fn dispose(&mut self, handle: FakeHandle) -> Result<()> {
        self.journal.push(format!("dispose #{}", handle.id));
        Ok(())
    }

    fn subscribe_close(&mut self) -> Receiver<TerminalClosed> {
        let (tx, rx) = mpsc::channel();
        self.state.borrow_mut().closers.push(tx);
        rx
    }
}
