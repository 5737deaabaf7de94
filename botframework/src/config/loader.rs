//! Loading: read the TOML file, overlay `TELEGRAM_*` environment variables, deserialize, validate.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Config, ConfigError};

/// Environment variable holding the config file path.
pub const CONFIG_PATH_ENV: &str = "TELEGRAM_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
/// Prefix of environment variables overriding top-level scalar fields.
pub const ENV_PREFIX: &str = "TELEGRAM_";

#[derive(Clone, Copy)]
enum OverrideKind {
    Str,
    Bool,
}

const ENV_OVERRIDES: &[(&str, OverrideKind)] = &[
    ("api_token", OverrideKind::Str),
    ("api_url", OverrideKind::Str),
    ("persistence", OverrideKind::Bool),
    ("persistence_filepath", OverrideKind::Str),
    ("add_base_handler", OverrideKind::Bool),
    ("base_handler_log_level", OverrideKind::Str),
];

/// Config file path: `TELEGRAM_CONFIG` or `config.toml`.
pub fn config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Loads from [`config_path`] with environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path())
    }

    /// Loads from `path` with environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::parse(&contents, |key| env::var(key).ok())
    }

    /// Parses TOML `contents`, overlaying values returned by `env` for `TELEGRAM_*` keys, then validates.
    pub fn parse<F>(contents: &str, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut table: toml::Table = contents.parse()?;

        for (field, kind) in ENV_OVERRIDES {
            let var = format!("{}{}", ENV_PREFIX, field.to_ascii_uppercase());
            let Some(value) = env(&var) else {
                continue;
            };
            let parsed = match kind {
                OverrideKind::Str => toml::Value::String(value),
                OverrideKind::Bool => match parse_bool(&value) {
                    Some(b) => toml::Value::Boolean(b),
                    None => return Err(ConfigError::EnvOverride { var, value }),
                },
            };
            debug!(var = %var, "Config field overridden from environment");
            table.insert(field.to_string(), parsed);
        }

        let config: Config = toml::Value::Table(table).try_into()?;
        config.validate()?;
        Ok(config)
    }
}
