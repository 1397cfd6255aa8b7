//! Configuration management for run-in-terminal

mod jsonc;
pub mod loader;
mod settings;

// Re-export main types
pub use loader::{CONFIG_ENV, CONFIG_FILE_NAME, JsonSettings, StaticConfig, find_config_file};
pub use settings::{Config, SECTION, default_clear_command};
