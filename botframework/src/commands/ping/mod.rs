//! `ping` command: counts invocations in bot data and answers after a configurable delay.

mod config;
mod handler;

pub use config::PingConfig;
pub use handler::ping;

use crate::config::{CommandConfig, ConfigError};
use crate::manager::CommandRegistry;

pub const NAME: &str = "ping";

/// Validates the command's settings and registers `/ping`.
pub fn install(command: &CommandConfig, registry: &mut CommandRegistry) -> Result<(), ConfigError> {
    let config = PingConfig::from_command(command)?;
    registry.provide(config);
    crate::register!(registry, ping);
    Ok(())
}
