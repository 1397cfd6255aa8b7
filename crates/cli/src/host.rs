//! The command-line host: settings from JSON files, a shell as the terminal
//! and stderr for notifications.

use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

use run_in_terminal_core::{
    Dispatcher, JsonSettings, SessionState, ShellTerminal, TerminalManager, Workbench,
};

pub const WORKSPACE_ROOT_ENV: &str = "WORKSPACE_ROOT";

pub type CliDispatcher = Dispatcher<JsonSettings, ConsoleWorkbench, ShellTerminal>;

/// Options shared by every subcommand that talks to the host.
#[derive(Debug, Clone, Default)]
pub struct HostOptions {
    pub config: Option<PathBuf>,
    pub workspace_root: Option<PathBuf>,
    pub save_command: Option<String>,
    pub shell: Option<String>,
}

impl HostOptions {
    pub fn settings(&self) -> JsonSettings {
        match &self.config {
            Some(path) => JsonSettings::with_path(path),
            None => JsonSettings::new(),
        }
    }

    pub fn workbench(&self) -> ConsoleWorkbench {
        ConsoleWorkbench {
            settings: self.settings(),
            workspace_root: self.workspace_root.clone(),
            save_command: self.save_command.clone(),
        }
    }

    pub fn dispatcher(&self) -> CliDispatcher {
        let backend = match &self.shell {
            Some(shell) => ShellTerminal::with_program(shell, Vec::new()),
            None => ShellTerminal::new(),
        };
        Dispatcher::new(
            self.settings(),
            self.workbench(),
            TerminalManager::new(backend),
            SessionState::new(),
        )
    }
}

/// Workbench services for a terminal user.
///
/// There are no open documents to save, so save-all runs the configured
/// `--save-command` (e.g. asking a running editor to write its buffers) and
/// waits for it.
#[derive(Debug, Clone)]
pub struct ConsoleWorkbench {
    settings: JsonSettings,
    workspace_root: Option<PathBuf>,
    save_command: Option<String>,
}

impl Workbench for ConsoleWorkbench {
    fn save_all(&mut self) -> run_in_terminal_core::Result<bool> {
        let Some(save_command) = &self.save_command else {
            debug!("No save command configured");
            return Ok(true);
        };

        debug!("Saving with: {}", save_command);
        let status = shell_command(save_command).status()?;
        if !status.success() {
            warn!("Save command exited with {:?}", status.code());
        }
        Ok(status.success())
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn workspace_root(&self, file: &Path) -> Option<PathBuf> {
        if let Some(root) = &self.workspace_root {
            return Some(root.clone());
        }
        if let Some(root) = std::env::var_os(WORKSPACE_ROOT_ENV).filter(|r| !r.is_empty()) {
            return Some(PathBuf::from(root));
        }
        self.settings.workspace_root(file)
    }
}

fn shell_command(script: &str) -> Command {
    if cfg!(windows) {
        let mut command = Command::new("cmd");
        command.arg("/C").arg(script);
        command
    } else {
        let mut command = Command::new("sh");
        command.arg("-c").arg(script);
        command
    }
}

/// Make `path` absolute against the current directory.
pub fn absolute_path(path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        return path;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_workspace_root_wins() {
        let options = HostOptions {
            workspace_root: Some(PathBuf::from("/explicit")),
            ..Default::default()
        };
        assert_eq!(
            options.workbench().workspace_root(Path::new("/a/b.rs")),
            Some(PathBuf::from("/explicit"))
        );
    }

    #[test]
    fn test_workspace_root_from_settings_location() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join(".run-in-terminal.json");
        std::fs::write(&config, "{}").unwrap();

        let options = HostOptions {
            config: Some(config),
            ..Default::default()
        };
        assert_eq!(
            options.workbench().workspace_root(&temp.path().join("main.rs")),
            Some(temp.path().to_path_buf())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_save_command_is_awaited() {
        let temp = TempDir::new().unwrap();
        let marker = temp.path().join("saved");
        let options = HostOptions {
            save_command: Some(format!("sleep 0.1 && touch {}", marker.display())),
            ..Default::default()
        };

        assert!(options.workbench().save_all().unwrap());
        assert!(marker.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_save_command() {
        let options = HostOptions {
            save_command: Some("exit 3".to_string()),
            ..Default::default()
        };
        assert!(!options.workbench().save_all().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_path() {
        assert!(absolute_path("src/main.rs").is_absolute());
        assert_eq!(absolute_path("/a/b.rs"), PathBuf::from("/a/b.rs"));
    }
}
