//! Command modules shipped with the bot and their discovery from configuration.

pub mod ping;

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::config::{CommandConfig, ConfigError};
use crate::manager::CommandRegistry;

/// A command module: validates its settings and registers its handlers.
#[derive(Clone, Copy)]
pub struct CommandModule {
    pub name: &'static str,
    pub install: fn(&CommandConfig, &mut CommandRegistry) -> Result<(), ConfigError>,
}

/// Every command module compiled into this binary.
pub fn catalog() -> &'static [CommandModule] {
    &[CommandModule {
        name: ping::NAME,
        install: ping::install,
    }]
}

pub fn find(name: &str) -> Option<&'static CommandModule> {
    catalog().iter().find(|module| module.name == name)
}

/// Installs the module of every configured command, in name order. Configured names without a
/// module are skipped. Returns the names installed.
pub fn autodiscover(
    registry: &mut CommandRegistry,
    commands: &BTreeMap<String, CommandConfig>,
) -> Result<Vec<&'static str>, ConfigError> {
    let mut installed = Vec::new();
    for (name, command) in commands {
        let Some(module) = find(name) else {
            debug!(command = %name, "No module for configured command");
            continue;
        };
        (module.install)(command, registry)?;
        installed.push(module.name);
    }
    info!(commands = ?installed, "Command modules installed");
    Ok(installed)
}
