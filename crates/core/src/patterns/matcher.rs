use lru::LruCache;
use regex::Regex;
use std::cell::RefCell;
use std::num::NonZeroUsize;
use tracing::warn;

use crate::{
    error::{Error, Result},
    interfaces::Workbench,
};

const DEFAULT_CACHE_SIZE: usize = 64;

/// Tests file names against user supplied regular expressions.
///
/// An invalid pattern disables only the rule that carries it: the user is
/// told about it and the pattern simply does not match.
pub struct PatternMatcher {
    compiled: RefCell<LruCache<String, Regex>>,
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternMatcher {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            compiled: RefCell::new(LruCache::new(capacity)),
        }
    }

    /// Unanchored regex test of `subject` against `pattern`.
    ///
    /// An empty pattern never matches. A pattern that fails to compile is
    /// reported through `workbench` and treated as not matching.
    pub fn is_match(&self, pattern: &str, subject: &str, workbench: &mut dyn Workbench) -> bool {
        match self.try_match(pattern, subject) {
            Ok(matched) => matched,
            Err(e) => {
                warn!("{e:?}");
                workbench.show_error(&format!("run-in-terminal: {e}"));
                false
            }
        }
    }

    /// Like [`is_match`](Self::is_match) but returns compile errors.
    pub fn try_match(&self, pattern: &str, subject: &str) -> Result<bool> {
        if pattern.is_empty() {
            return Ok(false);
        }

        let mut compiled = self.compiled.borrow_mut();
        if let Some(regex) = compiled.get(pattern) {
            return Ok(regex.is_match(subject));
        }

        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let matched = regex.is_match(subject);
        compiled.put(pattern.to_string(), regex);
        Ok(matched)
    }
}
