//! `${...}` placeholder expansion
//!
//! The template is scanned once, left to right. Substituted values are copied
//! to the output and never rescanned, so a file path that happens to contain
//! `${line}` is left alone.

use std::borrow::Cow;

use crate::{config::Config, types::ExecutionContext};

const OPEN: &str = "${";
const CLOSE: char = '}';
const ENV_PREFIX: &str = "env.";

/// Expand every known placeholder in `template` and apply the clear prefix.
///
/// Unknown placeholders and an unterminated `${` are kept verbatim. The result
/// always starts with one space, followed by the clear directive when
/// `clear_before_run` is set.
pub fn expand(template: &str, context: &ExecutionContext, config: &Config) -> String {
    let body = substitute(template, context);
    if config.clear_before_run {
        format!(" {}; {body}", config.clear_command)
    } else {
        format!(" {body}")
    }
}

/// Placeholder substitution without the clear prefix.
pub fn substitute(template: &str, context: &ExecutionContext) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + OPEN.len()..];

        let Some(end) = after_open.find(CLOSE) else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after_open[..end];
        match lookup(name, context) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[start..start + OPEN.len() + end + 1]),
        }
        rest = &after_open[end + 1..];
    }

    out.push_str(rest);
    out
}

fn lookup<'a>(name: &str, context: &'a ExecutionContext) -> Option<Cow<'a, str>> {
    let value = match name {
        "line" => Cow::Owned(context.line.to_string()),
        "column" => Cow::Owned(context.column.to_string()),
        "relativeFile" => Cow::Owned(context.relative_file()),
        "file" => context.file_str(),
        "workspaceRoot" => context.workspace_root_str(),
        "fileBasename" => context.basename(),
        "fileDirname" => context.dirname(),
        "fileExtname" => Cow::Owned(context.extname()),
        "fileBasenameNoExt" => context.basename_no_ext(),
        "cwd" => context.cwd_str(),
        _ => {
            let var = name.strip_prefix(ENV_PREFIX).filter(|v| !v.is_empty())?;
            Cow::Owned(
                std::env::var_os(var)
                    .map(|v| v.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            )
        }
    };
    Some(value)
}
