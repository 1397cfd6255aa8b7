use anyhow::{Result, bail};
use serde::Serialize;
use std::path::PathBuf;

use run_in_terminal_core::{
    ActiveEditor, CommandResolver, CommandSpec, ConfigSource, ExecutionContext, PatternMatcher,
    RuleSource, Workbench, expand,
};

use crate::host::{HostOptions, absolute_path};
use crate::utils::parse_file_position;

/// Resolve and expand without touching the terminal or saving anything.
pub fn preview(
    options: &HostOptions,
    editor: &ActiveEditor,
    invocation: &CommandSpec,
) -> Result<Option<(RuleSource, String)>> {
    let settings = options.settings();
    let mut workbench = options.workbench();
    let config = settings.load(&editor.path)?;

    let matcher = PatternMatcher::new();
    let Some(resolution) = CommandResolver::new(&matcher).resolve(
        invocation,
        &config,
        &editor.file_name(),
        &mut workbench,
    ) else {
        return Ok(None);
    };

    let context = ExecutionContext::new(
        editor,
        workbench.workspace_root(&editor.path),
        std::env::current_dir()?,
    );
    Ok(Some((
        resolution.source,
        expand(&resolution.template, &context, &config),
    )))
}

/// Machine-readable form of `resolve --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveReport {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
    pub settings: Option<PathBuf>,
    /// `"adHoc"`, `"commands[N]"`, or absent when nothing matched
    pub rule: Option<String>,
    pub command: Option<String>,
}

pub fn resolve_command(
    options: &HostOptions,
    filepath_arg: &str,
    invocation: Option<CommandSpec>,
    json: bool,
) -> Result<()> {
    let (filepath, cursor) = parse_file_position(filepath_arg);
    let editor = ActiveEditor::new(absolute_path(&filepath), cursor);
    let Some(invocation) = invocation else {
        bail!("nothing to resolve: pass --name, or --match with --cmd");
    };

    let settings = options.settings().locate(&editor.path);
    let resolved = preview(options, &editor, &invocation)?;
    let (line, column) = cursor.one_based();

    if json {
        let (rule, command) = match resolved {
            Some((source, command)) => (
                Some(match source {
                    RuleSource::AdHoc => "adHoc".to_string(),
                    RuleSource::Named { index } => format!("commands[{index}]"),
                }),
                Some(command.trim_start().to_string()),
            ),
            None => (None, None),
        };
        let report = ResolveReport {
            file: editor.path.clone(),
            line,
            column,
            settings,
            rule,
            command,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("🔍 File: {}:{line}:{column}", editor.path.display());
    match settings {
        Some(path) => println!("⚙️  Settings: {}", path.display()),
        None => println!("⚙️  Settings: none (defaults)"),
    }

    match resolved {
        Some((source, command)) => {
            match source {
                RuleSource::AdHoc => println!("✅ Matched ad-hoc rule"),
                RuleSource::Named { index } => println!(
                    "✅ Matched commands[{index}] ({})",
                    invocation.name().unwrap_or_default()
                ),
            }
            println!("🎯 Command: {}", command.trim_start());
        }
        None => println!("❌ No command found"),
    }
    Ok(())
}
