use serde::Deserialize;

use crate::config::{CommandConfig, ConfigError};

/// Settings of the `ping` command (`[commands.ping.env]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PingConfig {
    /// Seconds between "Ping..." and the "Pong" reply.
    pub wait_time: u64,
}

impl PingConfig {
    pub fn from_command(command: &CommandConfig) -> Result<Self, ConfigError> {
        command.settings(super::NAME)
    }
}
