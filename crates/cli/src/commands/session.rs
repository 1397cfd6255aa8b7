//! Line-oriented session: one shell, many runs.
//!
//! Each input line is a request:
//!
//! ```text
//! run src/main.rs:10:4 name=test
//! run src/x.go match='\.go$' cmd='go run .'
//! last src/other.rs:1
//! close
//! quit
//! ```

use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};
use tracing::debug;

use run_in_terminal_core::{
    ActiveEditor, CommandSpec, ConfigSource, DispatchOutcome, Dispatcher, TerminalBackend,
    Workbench,
};

use crate::host::{HostOptions, absolute_path};
use crate::utils::parse_file_position;

const HELP: &str = "\
commands:
  run FILE[:LINE[:COL]] [name=NAME] [match=REGEX] [cmd=TEMPLATE]
  last FILE[:LINE[:COL]]
  close
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Run {
        editor: Option<ActiveEditor>,
        invocation: Option<CommandSpec>,
    },
    Last {
        editor: Option<ActiveEditor>,
    },
    Close,
    Help,
    Quit,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_request(line: &str) -> Result<Option<Request>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let tokens = shell_words::split(line).with_context(|| format!("Cannot parse: {line}"))?;
    let Some((verb, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let request = match verb.as_str() {
        "run" | "r" => {
            let (editor, invocation) = parse_run_args(args)?;
            Request::Run { editor, invocation }
        }
        "last" | "l" => {
            let (editor, invocation) = parse_run_args(args)?;
            if invocation.is_some() {
                bail!("last takes no arguments besides the file");
            }
            Request::Last { editor }
        }
        "close" => Request::Close,
        "help" | "?" => Request::Help,
        "quit" | "exit" | "q" => Request::Quit,
        other => bail!("unknown request {other:?}, try help"),
    };
    Ok(Some(request))
}

fn parse_run_args(args: &[String]) -> Result<(Option<ActiveEditor>, Option<CommandSpec>)> {
    let mut editor = None;
    let mut invocation: Option<CommandSpec> = None;

    for arg in args {
        let field = arg
            .split_once('=')
            .filter(|(key, _)| matches!(*key, "name" | "match" | "cmd"));
        match field {
            Some((key, value)) => {
                let spec = invocation.get_or_insert_with(CommandSpec::default);
                let value = Some(value.to_string());
                match key {
                    "name" => spec.name = value,
                    "match" => spec.pattern = value,
                    _ => spec.cmd = value,
                }
            }
            None if editor.is_none() => {
                let (path, cursor) = parse_file_position(arg);
                editor = Some(ActiveEditor::new(absolute_path(&path), cursor));
            }
            None => bail!("unexpected argument {arg:?}"),
        }
    }

    Ok((editor, invocation))
}

/// Serve requests from `input` until it ends or `quit` is read.
/// Problems are reported to `out` and the session carries on.
pub fn run_session<C, W, B, R, O>(
    dispatcher: &mut Dispatcher<C, W, B>,
    input: R,
    out: &mut O,
) -> Result<()>
where
    C: ConfigSource,
    W: Workbench,
    B: TerminalBackend,
    R: BufRead,
    O: Write,
{
    for line in input.lines() {
        let line = line.context("Failed to read request")?;
        debug!("Request: {}", line);

        let request = match parse_request(&line) {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "run-in-terminal: {e:#}")?;
                continue;
            }
        };

        let outcome = match request {
            Request::Run { editor, invocation } => dispatcher.dispatch(editor.as_ref(), invocation),
            Request::Last { editor } => dispatcher.run_last(editor.as_ref()),
            Request::Close => {
                if let Err(e) = dispatcher.deactivate() {
                    writeln!(out, "run-in-terminal: {e}")?;
                }
                continue;
            }
            Request::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Request::Quit => break,
        };

        match outcome {
            Ok(DispatchOutcome::Executed(command)) => writeln!(out, "> {}", command.trim_start())?,
            Ok(DispatchOutcome::NoCommand) => writeln!(out, "run-in-terminal: no command found")?,
            Ok(DispatchOutcome::NoArgs) => writeln!(out, "run-in-terminal: no args.")?,
            Ok(DispatchOutcome::NoEditor) => writeln!(out, "run-in-terminal: no editor.")?,
            Ok(DispatchOutcome::NoLast) => writeln!(out, "run-in-terminal: nothing to run again")?,
            Err(e) => writeln!(out, "run-in-terminal: {e}")?,
        }
        out.flush()?;
    }

    dispatcher.deactivate()?;
    Ok(())
}

pub fn session_command(options: &HostOptions) -> Result<()> {
    let mut dispatcher = options.dispatcher();
    let stdin = std::io::stdin();
    let mut stderr = std::io::stderr();
    run_session(&mut dispatcher, stdin.lock(), &mut stderr)
}
