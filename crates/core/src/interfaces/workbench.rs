//! Workbench services provided by the host editor

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Editor-level services the dispatcher relies on.
pub trait Workbench {
    /// Save every open document. Blocks until the host reports completion.
    ///
    /// Returns `false` when the host declined or failed to save some files.
    fn save_all(&mut self) -> Result<bool>;

    /// Show an error notification to the user.
    fn show_error(&mut self, message: &str);

    /// Root folder of the workspace that contains `file`, if any.
    fn workspace_root(&self, file: &Path) -> Option<PathBuf>;
}
