//! Bot configuration: TOML file (path from `TELEGRAM_CONFIG`, default `config.toml`) with
//! `TELEGRAM_*` environment overrides for scalar fields.

mod error;
mod loader;
mod settings;


pub use error::ConfigError;
pub use loader::{config_path, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, ENV_PREFIX};
pub use settings::{mask_token, CommandConfig, Config, LogLevel, SecretToken};
