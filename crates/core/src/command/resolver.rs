use tracing::debug;

use crate::{config::Config, interfaces::Workbench, patterns::PatternMatcher, types::CommandSpec};

/// Which rule produced a command template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSource {
    /// The invocation carried its own `match` and `cmd`
    AdHoc,
    /// Entry `index` of the configured commands
    Named { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub template: String,
    pub source: RuleSource,
}

/// Decides which command template applies to the active file.
pub struct CommandResolver<'a> {
    matcher: &'a PatternMatcher,
}

impl<'a> CommandResolver<'a> {
    pub fn new(matcher: &'a PatternMatcher) -> Self {
        Self { matcher }
    }

    /// Resolve `invocation` for `file_name`. First applicable rule wins:
    ///
    /// 1. the invocation's own `match` and `cmd`, when the file matches
    /// 2. the first configured command with the invocation's `name` whose
    ///    pattern matches the file and whose `cmd` is not `""`; if that
    ///    entry has no `cmd` at all, nothing is found
    pub fn resolve(
        &self,
        invocation: &CommandSpec,
        config: &Config,
        file_name: &str,
        workbench: &mut dyn Workbench,
    ) -> Option<Resolution> {
        if let (Some(pattern), Some(cmd)) = (invocation.pattern(), invocation.cmd()) {
            if self.matcher.is_match(pattern, file_name, workbench) {
                debug!("Ad-hoc rule {:?} matched {}", pattern, file_name);
                return Some(Resolution {
                    template: cmd.to_string(),
                    source: RuleSource::AdHoc,
                });
            }
        }

        let name = invocation.name()?;
        // an entry with "cmd": "" is passed over, one without a cmd ends the search
        let (index, candidate) = config.commands_named(name).find(|(_, candidate)| {
            self.matcher
                .is_match(candidate.pattern().unwrap_or_default(), file_name, workbench)
                && candidate.cmd.as_deref() != Some("")
        })?;
        let Some(cmd) = candidate.cmd() else {
            debug!("Command {:?} #{} has no cmd", name, index);
            return None;
        };
        debug!("Command {:?} #{} matched {}", name, index, file_name);
        Some(Resolution {
            template: cmd.to_string(),
            source: RuleSource::Named { index },
        })
    }
}
