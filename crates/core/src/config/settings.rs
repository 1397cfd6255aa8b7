use crate::{
    error::{Error, Result},
    types::CommandSpec,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use super::jsonc;

/// Name of the settings section, as used by editor settings files.
pub const SECTION: &str = "runInTerminal";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Named command bindings, searched in order
    pub commands: Vec<CommandSpec>,

    /// Clear the terminal before each command
    pub clear_before_run: bool,

    /// Save all open files before each command
    pub save_all_before_run: bool,

    /// Directive used to clear the screen when `clear_before_run` is set
    pub clear_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            clear_before_run: false,
            save_all_before_run: false,
            clear_command: default_clear_command().to_string(),
        }
    }
}

pub fn default_clear_command() -> &'static str {
    if cfg!(windows) { "cls" } else { "clear" }
}

impl Config {
    /// Parse a settings document.
    ///
    /// Three shapes are accepted:
    /// - a `runInTerminal` object: `{"runInTerminal": {"commands": [...]}}`
    /// - flat dotted keys: `{"runInTerminal.commands": [...]}`
    /// - the bare section: `{"commands": [...], "clearBeforeRun": true}`
    ///
    /// Comments and trailing commas are allowed.
    pub fn from_settings_str(contents: &str) -> Result<Self> {
        let cleaned = jsonc::strip(contents);
        let value: Value = serde_json::from_str(&cleaned)
            .map_err(|e| Error::ConfigError(format!("Failed to parse settings: {e}")))?;
        Self::from_settings_value(value)
    }

    pub fn from_settings_value(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(Error::ConfigError(
                "settings must be a JSON object".to_string(),
            ));
        };

        let section = match map.remove(SECTION) {
            Some(section) => section,
            None => {
                let prefix = format!("{SECTION}.");
                let flat: Map<String, Value> = map
                    .iter()
                    .filter_map(|(key, value)| {
                        key.strip_prefix(&prefix)
                            .map(|key| (key.to_string(), value.clone()))
                    })
                    .collect();
                if flat.is_empty() {
                    Value::Object(map)
                } else {
                    Value::Object(flat)
                }
            }
        };

        serde_json::from_value(section)
            .map_err(|e| Error::ConfigError(format!("Invalid {SECTION} settings: {e}")))
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_settings_str(&contents).map_err(|e| match e {
            Error::ConfigError(msg) => Error::ConfigError(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Commands configured under `name` with their index, in resolution order.
    pub fn commands_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = (usize, &'a CommandSpec)> {
        self.commands
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.name.as_deref() == Some(name))
    }
}
