//! Configuration schema.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use botframework_core::{Defaults, LoggingConfig};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::Level;

use super::ConfigError;

/// Masks a token for logging: first 7 + "***" + last 4 characters; tokens of 11 characters or
/// fewer become "***".
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Bot API token. `Debug` prints it masked.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SecretToken(String);

impl SecretToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretToken({})", mask_token(&self.0))
    }
}

/// Level of the base handler's "Incoming update" line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    #[serde(alias = "warn")]
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub fn as_tracing(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warning => Level::WARN,
            LogLevel::Error | LogLevel::Critical => Level::ERROR,
        }
    }
}

/// Per-command entry: activation flag and command-specific settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommandConfig {
    pub active: bool,
    #[serde(default)]
    pub env: toml::Table,
}

impl CommandConfig {
    /// Deserializes `env` into the command's own settings type.
    pub fn settings<T: DeserializeOwned>(&self, command: &str) -> Result<T, ConfigError> {
        toml::Value::Table(self.env.clone())
            .try_into()
            .map_err(|source| ConfigError::CommandSettings {
                command: command.to_string(),
                source,
            })
    }
}

/// Validated bot configuration. Built once at startup, read-only afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_token: SecretToken,
    /// Custom Bot API server URL.
    #[serde(default)]
    pub api_url: Option<String>,
    pub persistence: bool,
    #[serde(default)]
    pub persistence_filepath: Option<PathBuf>,
    pub add_base_handler: bool,
    #[serde(default)]
    pub base_handler_log_level: LogLevel,
    #[serde(default, alias = "handlers")]
    pub commands: BTreeMap<String, CommandConfig>,
    #[serde(default)]
    pub defaults: Option<Defaults>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Checks cross-field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_token.expose_secret().trim().is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        if self.persistence && self.persistence_filepath.is_none() {
            return Err(ConfigError::MissingPersistenceFilepath);
        }
        if let Some(url) = &self.api_url {
            reqwest::Url::parse(url).map_err(|e| ConfigError::InvalidApiUrl {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Names of commands marked active, in sorted order.
    pub fn active_commands(&self) -> impl Iterator<Item = &str> {
        self.commands
            .iter()
            .filter(|(_, command)| command.active)
            .map(|(name, _)| name.as_str())
    }
}
