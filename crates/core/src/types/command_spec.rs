use serde::{Deserialize, Serialize};

use crate::utils::serde_helpers::coerce_optional_string;

/// A command binding, either configured in settings or passed with an invocation.
///
/// `match` is a regular expression tested against the active file path and
/// `cmd` is a template that may contain `${...}` placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "match")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(
        default,
        deserialize_with = "coerce_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cmd: Option<String>,
}

impl CommandSpec {
    /// A lookup by name against the configured commands.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// An ad-hoc rule that bypasses the configured commands.
    pub fn ad_hoc(pattern: impl Into<String>, cmd: impl Into<String>) -> Self {
        Self {
            name: None,
            pattern: Some(pattern.into()),
            cmd: Some(cmd.into()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    pub fn pattern(&self) -> Option<&str> {
        non_empty(self.pattern.as_deref())
    }

    pub fn cmd(&self) -> Option<&str> {
        non_empty(self.cmd.as_deref())
    }
}

// Empty strings behave like absent fields, the way a host passes `""` for an
// unset argument.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
