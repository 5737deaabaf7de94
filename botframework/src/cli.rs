//! CLI parser and config loading.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{config_path, Config, ConfigError, SecretToken};

#[derive(Parser)]
#[command(name = "botframework")]
#[command(about = "Config-driven Telegram bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot until Ctrl-C.
    Run {
        /// Config file (default: $TELEGRAM_CONFIG or config.toml).
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Overrides api_token from the file and environment.
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Validate the config and list the configured commands.
    Check {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Loads the config from `path` (or the default location). `token` replaces the configured token.
pub fn load_config(path: Option<PathBuf>, token: Option<String>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(config_path);
    let mut config = Config::load_from(&path)?;
    if let Some(token) = token {
        config.api_token = SecretToken::new(token);
        config.validate()?;
    }
    Ok(config)
}
