//! Builds the Telegram application from [`Config`] and attaches registered handlers to it.

use std::collections::BTreeMap;
use std::sync::Arc;

use botframework_dispatch::{Application, FilePersistence};
use botframework_telegram::{ApplicationBuilder, TelegramApplication};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{CommandConfig, Config, ConfigError};
use crate::handlers::base_handler;
use crate::manager::registry::{CommandRegistry, RegisteredHandler};

/// Group of the catch-all logging handler; runs before every command.
pub const BASE_HANDLER_GROUP: i32 = -1;

#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("Handler {0:?} is not registered")]
    HandlerNotRegistered(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build application: {0:#}")]
    Build(#[from] anyhow::Error),
}

/// Owns the application and the registered handlers; attaches and detaches them by name.
pub struct ApplicationManager {
    app: TelegramApplication,
    handlers: BTreeMap<String, RegisteredHandler>,
    commands: BTreeMap<String, CommandConfig>,
}

impl ApplicationManager {
    /// Builds the application (token, API URL, persistence, defaults) and attaches the base
    /// handler when `add_base_handler` is set. No command handler is attached yet.
    pub fn new(config: &Config, registry: CommandRegistry) -> Result<Self, ManagerError> {
        config.validate()?;

        let mut builder = ApplicationBuilder::new().token(config.api_token.expose_secret());
        if let Some(api_url) = &config.api_url {
            builder = builder.api_url(api_url.clone());
        }
        if let Some(path) = config.persistence_filepath.as_ref().filter(|_| config.persistence) {
            info!(path = %path.display(), "Persistence enabled");
            builder = builder.persistence(Arc::new(FilePersistence::new(path.clone())));
        }
        if let Some(defaults) = &config.defaults {
            builder = builder.defaults(defaults.clone());
        }
        let mut app = builder.build()?;

        let (handlers, dependencies) = registry.into_parts();
        app.application_mut().set_dependencies(dependencies);

        if config.add_base_handler {
            app.application_mut().add_handler(
                base_handler(config.base_handler_log_level),
                BASE_HANDLER_GROUP,
            );
            info!(level = ?config.base_handler_log_level, "Base handler attached");
        }

        Ok(Self {
            app,
            handlers,
            commands: config.commands.clone(),
        })
    }

    /// Attaches the handler of every active command. Active commands without a registered
    /// handler are skipped with a warning. Returns the number of handlers attached.
    pub fn enable_configured_handlers(&mut self) -> usize {
        let active: Vec<String> = self
            .commands
            .iter()
            .filter(|(_, command)| command.active)
            .map(|(name, _)| name.clone())
            .collect();

        let mut enabled = 0;
        for name in active {
            match self.enable_command_handler(&name) {
                Ok(()) => enabled += 1,
                Err(_) => warn!(command = %name, "Command is active but has no registered handler"),
            }
        }
        info!(enabled, "Configured handlers enabled");
        enabled
    }

    /// Attaches the handler registered as `name`, regardless of its `active` flag.
    pub fn enable_command_handler(&mut self, name: &str) -> Result<(), ManagerError> {
        let entry = self
            .handlers
            .get(name)
            .ok_or_else(|| ManagerError::HandlerNotRegistered(name.to_string()))?;
        let group = entry.group();
        self.app
            .application_mut()
            .add_handler(entry.handler.clone(), group);
        info!(command = name, handler = entry.handler.name(), group, "Command handler enabled");
        Ok(())
    }

    /// Detaches the handler registered as `name`. Detaching a handler that is not attached is a no-op.
    pub fn disable_command_handler(&mut self, name: &str) -> Result<(), ManagerError> {
        let entry = self
            .handlers
            .get(name)
            .ok_or_else(|| ManagerError::HandlerNotRegistered(name.to_string()))?;
        let group = entry.group();
        if self
            .app
            .application_mut()
            .remove_handler(&entry.handler, group)
        {
            info!(command = name, group, "Command handler disabled");
        } else {
            debug!(command = name, group, "Command handler was not enabled");
        }
        Ok(())
    }

    /// Whether the handler registered as `name` is currently attached.
    pub fn is_enabled(&self, name: &str) -> bool {
        let Some(entry) = self.handlers.get(name) else {
            return false;
        };
        self.app
            .application()
            .handlers(entry.group())
            .iter()
            .any(|h| std::ptr::addr_eq(Arc::as_ptr(h), Arc::as_ptr(&entry.handler)))
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn application(&self) -> &Application {
        self.app.application()
    }

    pub fn into_application(self) -> TelegramApplication {
        self.app
    }
}
