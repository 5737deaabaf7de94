//! Config-driven Telegram bot: TOML settings with environment overrides, a named command registry,
//! and an application manager that enables configured commands.

pub mod cli;
pub mod commands;
pub mod config;
pub mod handlers;
pub mod manager;
pub mod runner;

pub use botframework_core::{callback, fallback_tracing, Context, Result, Update};
pub use cli::{load_config, Cli, Commands};
pub use config::{CommandConfig, Config, ConfigError, LogLevel, SecretToken};
pub use manager::{
    ApplicationManager, CommandRegistry, ManagerError, RegisteredHandler, BASE_HANDLER_GROUP,
};
pub use runner::{build_manager, describe_commands, run_bot};
