//! Configuration file handling for the CLI

use anyhow::{Context, Result};
use krill_core::SessionConfig;
use std::{path::PathBuf, sync::LazyLock};

static CONFIG: LazyLock<PathBuf> =
    LazyLock::new(|| dirs::home_dir().unwrap().join(".config/krill.toml"));

/// The configuration file path
pub fn config_path() -> &'static std::path::Path {
    CONFIG.as_path()
}

/// Load the configuration, falling back to defaults when no file exists.
pub fn load() -> Result<SessionConfig> {
    if CONFIG.exists() {
        SessionConfig::load(CONFIG.as_path())
            .with_context(|| format!("failed to load {}", CONFIG.display()))
    } else {
        Ok(SessionConfig::default())
    }
}

/// Write the default configuration scaffold.
pub fn generate() -> Result<()> {
    if let Some(parent) = CONFIG.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let contents =
        toml::to_string_pretty(&SessionConfig::default()).context("failed to serialize config")?;
    std::fs::write(CONFIG.as_path(), contents)
        .with_context(|| format!("failed to write {}", CONFIG.display()))?;
    tracing::info!("configuration saved to {}", CONFIG.display());
    Ok(())
}
