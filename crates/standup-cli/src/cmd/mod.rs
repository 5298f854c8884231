pub mod config;
pub mod last;
pub mod serve;
pub mod submit;
pub mod thread_key;

use anyhow::Context;
use standup_core::config::{Config, WarnLevel};
use standup_core::orchestrator::StandupService;
use std::path::Path;

pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(p) => Config::load(Some(p)).with_context(|| format!("failed to load {}", p.display())),
        None => Config::load(None).context("failed to load config"),
    }
}

/// Load the config and refuse to continue on any error-level problem.
/// Warnings are logged and otherwise ignored.
pub(crate) fn load_checked_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = load_config(path)?;
    check_config(&config)?;
    Ok(config)
}

pub(crate) fn check_config(config: &Config) -> anyhow::Result<()> {
    for warning in config.validate() {
        match warning.level {
            WarnLevel::Warning => tracing::warn!("{}", warning.message),
            WarnLevel::Error => anyhow::bail!("invalid config: {}", warning.message),
        }
    }
    Ok(())
}

pub(crate) fn service(config: &Config) -> anyhow::Result<StandupService> {
    Ok(StandupService::from_config(config)?)
}

pub(crate) fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Runtime::new()?)
}
