//! Settings discovery
//!
//! Settings are looked up next to the active file: the nearest
//! `.run-in-terminal.json` or `.vscode/settings.json` walking up from the
//! file's directory wins. `RUN_IN_TERMINAL_CONFIG` points at a file directly.

use std::path::{Path, PathBuf};
use tracing::debug;

use super::Config;
use crate::{error::Result, interfaces::ConfigSource};

pub const CONFIG_FILE_NAME: &str = ".run-in-terminal.json";
pub const CONFIG_ENV: &str = "RUN_IN_TERMINAL_CONFIG";

const EDITOR_SETTINGS_DIR: &str = ".vscode";
const EDITOR_SETTINGS_FILE: &str = "settings.json";

/// Walk up from `start_path` looking for a settings file.
pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
    let mut current = start_path;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            return Some(config_path);
        }

        let config_path = current.join(EDITOR_SETTINGS_DIR).join(EDITOR_SETTINGS_FILE);
        if config_path.is_file() {
            return Some(config_path);
        }

        current = current.parent()?;
    }
}

/// Reads settings from JSON files on every load.
#[derive(Debug, Clone, Default)]
pub struct JsonSettings {
    explicit: Option<PathBuf>,
}

impl JsonSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always read `path`, skipping discovery.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            explicit: Some(path.into()),
        }
    }

    /// The settings file that applies to `active_file`, if any.
    pub fn locate(&self, active_file: &Path) -> Option<PathBuf> {
        if let Some(path) = &self.explicit {
            return Some(path.clone());
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        find_config_file(&search_start(active_file))
    }

    /// The workspace folder for `active_file`: the directory holding its
    /// settings file, or the parent of `.vscode` for editor settings.
    pub fn workspace_root(&self, active_file: &Path) -> Option<PathBuf> {
        let settings = self.locate(active_file)?;
        let dir = settings.parent()?;
        let root = if dir.file_name().is_some_and(|n| n == EDITOR_SETTINGS_DIR) {
            dir.parent()?
        } else {
            dir
        };
        Some(root.to_path_buf())
    }
}

impl ConfigSource for JsonSettings {
    fn load(&self, active_file: &Path) -> Result<Config> {
        match self.locate(active_file) {
            Some(path) => {
                debug!("Loading settings from {:?}", path);
                Config::load_from_file(&path)
            }
            None => {
                debug!("No settings found for {:?}, using defaults", active_file);
                Ok(Config::default())
            }
        }
    }
}

/// A fixed configuration, for embedding hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig(pub Config);

impl ConfigSource for StaticConfig {
    fn load(&self, _active_file: &Path) -> Result<Config> {
        Ok(self.0.clone())
    }
}

fn search_start(active_file: &Path) -> PathBuf {
    let absolute = if active_file.is_absolute() {
        active_file.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(active_file))
            .unwrap_or_else(|_| active_file.to_path_buf())
    };
    if absolute.is_dir() {
        absolute
    } else {
        absolute
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(absolute)
    }
}
