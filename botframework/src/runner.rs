//! Startup sequence: logging, command discovery, manager, polling.

use anyhow::{Context as _, Result};
use tracing::{info, instrument};

use botframework_core::init_tracing;

use crate::commands;
use crate::config::Config;
use crate::manager::{ApplicationManager, CommandRegistry};

/// Installs the configured command modules and builds a manager with their handlers enabled.
pub fn build_manager(config: &Config) -> Result<ApplicationManager> {
    let mut registry = CommandRegistry::new();
    commands::autodiscover(&mut registry, &config.commands)
        .context("Failed to install command modules")?;

    let mut manager =
        ApplicationManager::new(config, registry).context("Failed to build application")?;
    manager.enable_configured_handlers();
    Ok(manager)
}

/// Main entry: init logging, build the application, poll until Ctrl-C.
#[instrument(skip(config))]
pub async fn run_bot(config: Config) -> Result<()> {
    init_tracing(&config.logging)?;
    info!(config = ?config, "Configuration loaded");

    let manager = build_manager(&config)?;
    info!(
        handlers = manager.application().handler_count(),
        "Starting Telegram bot..."
    );
    manager.into_application().run_polling().await
}

/// Lines describing each configured command: activation and whether a module implements it.
pub fn describe_commands(config: &Config) -> Vec<String> {
    config
        .commands
        .iter()
        .map(|(name, command)| {
            format!(
                "{:<20} active={:<5} implemented={}",
                name,
                command.active,
                commands::find(name).is_some()
            )
        })
        .collect()
}
