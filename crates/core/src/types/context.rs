use std::borrow::Cow;
use std::path::{Path, PathBuf};

use super::Position;

/// The host's active editor: the open file and where the cursor sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEditor {
    pub path: PathBuf,
    pub cursor: Position,
}

impl ActiveEditor {
    pub fn new(path: impl Into<PathBuf>, cursor: Position) -> Self {
        Self {
            path: path.into(),
            cursor,
        }
    }

    /// The name matched against command patterns. This is the full path of the
    /// document, so patterns may select on directories as well as extensions.
    pub fn file_name(&self) -> Cow<'_, str> {
        self.path.to_string_lossy()
    }
}

/// Snapshot of everything placeholder expansion needs, taken once per dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    pub file: PathBuf,
    pub workspace_root: Option<PathBuf>,
    /// 1-based cursor line
    pub line: u32,
    /// 1-based cursor column
    pub column: u32,
    pub cwd: PathBuf,
}

impl ExecutionContext {
    pub fn new(editor: &ActiveEditor, workspace_root: Option<PathBuf>, cwd: PathBuf) -> Self {
        let (line, column) = editor.cursor.one_based();
        Self {
            file: editor.path.clone(),
            workspace_root,
            line,
            column,
            cwd,
        }
    }

    pub fn file_str(&self) -> Cow<'_, str> {
        self.file.to_string_lossy()
    }

    pub fn workspace_root_str(&self) -> Cow<'_, str> {
        self.workspace_root
            .as_deref()
            .map(Path::to_string_lossy)
            .unwrap_or(Cow::Borrowed(""))
    }

    /// The file path with the first occurrence of the workspace root removed,
    /// prefixed with `.` (e.g. `./src/main.rs`).
    pub fn relative_file(&self) -> String {
        let file = self.file_str();
        let root = self.workspace_root_str();
        if root.is_empty() {
            format!(".{file}")
        } else {
            format!(".{}", file.replacen(&*root, "", 1))
        }
    }

    pub fn basename(&self) -> Cow<'_, str> {
        self.file
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or(Cow::Borrowed(""))
    }

    pub fn dirname(&self) -> Cow<'_, str> {
        match self.file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_string_lossy(),
            _ => Cow::Borrowed("."),
        }
    }

    /// Extension including the leading dot, or empty when there is none.
    pub fn extname(&self) -> String {
        self.file
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    }

    pub fn basename_no_ext(&self) -> Cow<'_, str> {
        if self.file.extension().is_none() {
            return self.basename();
        }
        self.file
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or(Cow::Borrowed(""))
    }

    pub fn cwd_str(&self) -> Cow<'_, str> {
        self.cwd.to_string_lossy()
    }
}
