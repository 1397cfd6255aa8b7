//! Dispatcher that ties resolution, expansion and the terminal together

use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::{
    command::{CommandResolver, expand},
    error::Result,
    interfaces::{ConfigSource, TerminalBackend, Workbench},
    patterns::PatternMatcher,
    terminal::TerminalManager,
    types::{ActiveEditor, CommandSpec, ExecutionContext},
};

/// State that lives for as long as the host keeps the dispatcher around.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    last_command: Option<CommandSpec>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments of the most recent run, whether or not it resolved.
    pub fn last_command(&self) -> Option<&CommandSpec> {
        self.last_command.as_ref()
    }

    pub fn record(&mut self, invocation: CommandSpec) {
        self.last_command = Some(invocation);
    }
}

/// What a dispatch did. Only `Executed` sends anything to the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// There is no active editor
    NoEditor,
    /// The run request carried no arguments
    NoArgs,
    /// Run-last was requested before anything ran
    NoLast,
    /// No rule applies to the active file
    NoCommand,
    /// The expanded command was sent to the terminal
    Executed(String),
}

impl DispatchOutcome {
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::Executed(command) => Some(command),
            _ => None,
        }
    }
}

pub struct Dispatcher<C, W, B>
where
    C: ConfigSource,
    W: Workbench,
    B: TerminalBackend,
{
    config_source: C,
    workbench: W,
    terminal: TerminalManager<B>,
    matcher: PatternMatcher,
    state: SessionState,
}

impl<C, W, B> Dispatcher<C, W, B>
where
    C: ConfigSource,
    W: Workbench,
    B: TerminalBackend,
{
    pub fn new(
        config_source: C,
        workbench: W,
        terminal: TerminalManager<B>,
        state: SessionState,
    ) -> Self {
        Self {
            config_source,
            workbench,
            terminal,
            matcher: PatternMatcher::new(),
            state,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn workbench(&self) -> &W {
        &self.workbench
    }

    pub fn terminal(&mut self) -> &mut TerminalManager<B> {
        &mut self.terminal
    }

    /// Run the command that `invocation` selects for the active file.
    ///
    /// The invocation is remembered for [`run_last`](Self::run_last) before it
    /// is resolved, so a request that found no command is replayed as well.
    pub fn dispatch(
        &mut self,
        editor: Option<&ActiveEditor>,
        invocation: Option<CommandSpec>,
    ) -> Result<DispatchOutcome> {
        let Some(editor) = editor else {
            debug!("run-in-terminal: no editor.");
            return Ok(DispatchOutcome::NoEditor);
        };
        let Some(invocation) = invocation else {
            debug!("run-in-terminal: no args.");
            return Ok(DispatchOutcome::NoArgs);
        };

        debug!("run-in-terminal: {:?}", invocation);
        self.state.record(invocation.clone());

        let config = self.config_source.load(&editor.path)?;
        let file_name = editor.file_name();
        let resolution = CommandResolver::new(&self.matcher).resolve(
            &invocation,
            &config,
            &file_name,
            &mut self.workbench,
        );
        let Some(resolution) = resolution else {
            info!("run-in-terminal: no command found for args: {:?}", invocation);
            return Ok(DispatchOutcome::NoCommand);
        };

        if config.save_all_before_run {
            match self.workbench.save_all() {
                Ok(true) => debug!("Saved all files"),
                Ok(false) => warn!("Some files were not saved"),
                Err(e) => warn!("Saving files failed: {e}"),
            }
        }

        let workspace_root = self.workbench.workspace_root(&editor.path);
        let context = ExecutionContext::new(editor, workspace_root, current_dir());
        let command = expand(&resolution.template, &context, &config);

        info!("Running {:?}", command);
        self.terminal.run(&command)?;
        Ok(DispatchOutcome::Executed(command))
    }

    /// Replay the most recent invocation against the current editor.
    pub fn run_last(&mut self, editor: Option<&ActiveEditor>) -> Result<DispatchOutcome> {
        let Some(last) = self.state.last_command().cloned() else {
            debug!("run-in-terminal: nothing to run again.");
            return Ok(DispatchOutcome::NoLast);
        };
        self.dispatch(editor, Some(last))
    }

    /// Host teardown: dispose the terminal session.
    pub fn deactivate(&mut self) -> Result<()> {
        self.terminal.dispose()
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        warn!("Could not read the working directory: {e}");
        PathBuf::new()
    })
}
