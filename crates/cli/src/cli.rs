use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use run_in_terminal_core::CommandSpec;

use crate::commands::{init_command, resolve_command, run_command, session_command};
use crate::host::HostOptions;

#[derive(Parser, Debug)]
#[command(name = "run-in-terminal")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug                 Enable debug logging\n    RUN_IN_TERMINAL_CONFIG=PATH    Settings file to use\n    WORKSPACE_ROOT=DIR             Workspace root for ${workspaceRoot}")]
pub struct Cli {
    #[command(flatten)]
    pub host: HostArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct HostArgs {
    /// Settings file (default: nearest .run-in-terminal.json or .vscode/settings.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Workspace root used for ${workspaceRoot} and ${relativeFile}
    #[arg(long, global = true)]
    pub workspace_root: Option<PathBuf>,

    /// Shell command that saves open files, run before each command when
    /// saveAllBeforeRun is set
    #[arg(long, global = true)]
    pub save_command: Option<String>,

    /// Shell that runs the commands (default: $SHELL)
    #[arg(long, global = true)]
    pub shell: Option<String>,
}

impl From<HostArgs> for HostOptions {
    fn from(args: HostArgs) -> Self {
        Self {
            config: args.config,
            workspace_root: args.workspace_root,
            save_command: args.save_command,
            shell: args.shell,
        }
    }
}

/// The `{name?, match?, cmd?}` payload of a run request.
#[derive(Args, Debug, Clone, Default)]
pub struct InvocationArgs {
    /// Name of a configured command
    #[arg(short, long)]
    pub name: Option<String>,

    /// Ad-hoc regular expression tested against the file path
    #[arg(short, long = "match")]
    pub pattern: Option<String>,

    /// Ad-hoc command template, used when --match matches
    #[arg(short, long)]
    pub cmd: Option<String>,
}

impl InvocationArgs {
    /// `None` when no field was given, like a run request without arguments.
    pub fn into_spec(self) -> Option<CommandSpec> {
        if self.name.is_none() && self.pattern.is_none() && self.cmd.is_none() {
            return None;
        }
        Some(CommandSpec {
            name: self.name,
            pattern: self.pattern,
            cmd: self.cmd,
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the command for a file in a shell
    #[command(visible_alias = "r")]
    Run {
        /// Path to the file with optional line and column (e.g., src/main.rs:10:4)
        filepath: String,

        #[command(flatten)]
        invocation: InvocationArgs,

        /// Print the command without executing it
        #[arg(short, long)]
        dry_run: bool,
    },
    /// Show which rule applies to a file and the command it expands to
    #[command(visible_alias = "x")]
    Resolve {
        /// Path to the file with optional line and column (e.g., src/main.rs:10:4)
        filepath: String,

        #[command(flatten)]
        invocation: InvocationArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read run requests from stdin and serve them from one shell session
    Session,
    /// Write a sample .run-in-terminal.json
    Init {
        /// Directory to write the settings to (defaults to current directory)
        #[arg(long)]
        cwd: Option<String>,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        let options = HostOptions::from(self.host);
        match self.command {
            Commands::Run {
                filepath,
                invocation,
                dry_run,
            } => run_command(&options, &filepath, invocation.into_spec(), dry_run),
            Commands::Resolve {
                filepath,
                invocation,
                json,
            } => resolve_command(&options, &filepath, invocation.into_spec(), json),
            Commands::Session => session_command(&options),
            Commands::Init { cwd, force } => init_command(cwd.as_deref(), force),
        }
    }
}
