//! Builds an [`Application`] backed by a teloxide bot: token, optional Bot API server URL,
//! optional persistence and defaults.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use botframework_core::Defaults;
use botframework_dispatch::{Application, Persistence};
use tracing::debug;

use crate::bot_adapter::TelegramBotAdapter;

/// Builder for [`TelegramApplication`]. `token` is required.
#[derive(Default)]
pub struct ApplicationBuilder {
    token: Option<String>,
    api_url: Option<String>,
    persistence: Option<Arc<dyn Persistence>>,
    defaults: Option<Defaults>,
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Custom Bot API server (e.g. a local telegram-bot-api instance).
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn persistence(mut self, persistence: Arc<dyn Persistence>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    pub fn defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Creates the teloxide bot and the application. Performs no network calls.
    pub fn build(self) -> Result<TelegramApplication> {
        let token = self
            .token
            .ok_or_else(|| anyhow::anyhow!("Bot token is required to build the application"))?;
        let mut bot = teloxide::Bot::new(token);
        if let Some(url_str) = &self.api_url {
            let url = reqwest::Url::parse(url_str)
                .with_context(|| format!("Invalid Bot API URL: {}", url_str))?;
            debug!(api_url = %url, "Using custom Bot API URL");
            bot = bot.set_api_url(url);
        }

        let defaults = self.defaults.unwrap_or_default();
        let adapter = TelegramBotAdapter::new(bot.clone(), defaults.clone());
        let mut application = Application::new(Arc::new(adapter)).with_defaults(defaults);
        if let Some(persistence) = self.persistence {
            application = application.with_persistence(persistence);
        }

        Ok(TelegramApplication { application, bot })
    }
}

/// An [`Application`] together with the teloxide bot that polls for its updates.
pub struct TelegramApplication {
    pub(crate) application: Application,
    pub(crate) bot: teloxide::Bot,
}

impl TelegramApplication {
    pub fn application(&self) -> &Application {
        &self.application
    }

    pub fn application_mut(&mut self) -> &mut Application {
        &mut self.application
    }

    pub fn into_parts(self) -> (Application, teloxide::Bot) {
        (self.application, self.bot)
    }
}
