//! Filename pattern matching

pub mod matcher;

pub use matcher::PatternMatcher;
