use anyhow::{Context, Result};
use std::{env, fs, path::PathBuf};
use tracing::info;

use run_in_terminal_core::config::CONFIG_FILE_NAME;

use crate::config::create_default_config;

pub fn init_command(cwd: Option<&str>, force: bool) -> Result<()> {
    let project_root = match cwd {
        Some(cwd) => PathBuf::from(cwd),
        None => env::current_dir().context("Failed to get current directory")?,
    };

    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    fs::write(&config_path, create_default_config())
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    info!("Wrote {}", config_path.display());

    println!("✅ Created config: {}", config_path.display());
    println!("\n📌 Try it:");
    println!("   run-in-terminal run src/main.rs --name run");
    Ok(())
}
