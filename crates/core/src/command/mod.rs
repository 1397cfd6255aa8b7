//! Command resolution and placeholder expansion

pub mod expander;
pub mod resolver;

pub use expander::expand;
pub use resolver::{CommandResolver, Resolution, RuleSource};
