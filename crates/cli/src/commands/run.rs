use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use run_in_terminal_core::{ActiveEditor, CommandSpec, DispatchOutcome};

use crate::commands::resolve::preview;
use crate::host::{HostOptions, absolute_path};
use crate::utils::parse_file_position;

pub fn run_command(
    options: &HostOptions,
    filepath_arg: &str,
    invocation: Option<CommandSpec>,
    dry_run: bool,
) -> Result<()> {
    let (filepath, cursor) = parse_file_position(filepath_arg);
    let editor = ActiveEditor::new(absolute_path(&filepath), cursor);
    debug!("Running file: {:?} at {:?}", editor.path, cursor);

    if dry_run {
        let Some(invocation) = invocation else {
            bail!("nothing to run: pass --name, or --match with --cmd");
        };
        match preview(options, &editor, &invocation)? {
            Some((_, command)) => println!("{}", command.trim_start()),
            None => bail!("no command found for {}", editor.path.display()),
        }
        return Ok(());
    }

    let mut dispatcher = options.dispatcher();
    let outcome = dispatcher.dispatch(Some(&editor), invocation);
    // wait for the shell to finish before reporting
    let disposed = dispatcher.deactivate();

    let outcome =
        outcome.with_context(|| format!("Failed to run command for {}", editor.path.display()))?;
    disposed.context("Failed to close the terminal")?;

    match outcome {
        DispatchOutcome::Executed(command) => {
            info!("Ran: {}", command.trim_start());
            Ok(())
        }
        DispatchOutcome::NoCommand => bail!("no command found for {}", editor.path.display()),
        DispatchOutcome::NoArgs => bail!("nothing to run: pass --name, or --match with --cmd"),
        DispatchOutcome::NoEditor | DispatchOutcome::NoLast => Ok(()),
    }
}
