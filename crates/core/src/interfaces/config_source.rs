//! Configuration loading interface

use std::path::Path;

use crate::{config::Config, error::Result};

/// Loads the current settings. Called on every dispatch so edits to the
/// settings take effect without restarting the host.
pub trait ConfigSource {
    /// Load the settings that apply to `active_file`.
    fn load(&self, active_file: &Path) -> Result<Config>;
}
