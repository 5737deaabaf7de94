//! Long polling: converts teloxide updates to core::Update and passes them to Application::process_update.
//! Calls get_me once so command handlers can check `/command@bot` targets.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use botframework_core::{ToCoreUpdate, Update};
use botframework_dispatch::Application;
use teloxide::prelude::*;
use tracing::{error, info, instrument, warn};

use crate::adapters::TelegramUpdateWrapper;
use crate::builder::TelegramApplication;

impl TelegramApplication {
    /// Polls for updates until Ctrl-C, then flushes persistence.
    /// With `defaults.block = false` each update is processed on its own task instead of being awaited.
    #[instrument(skip(self))]
    pub async fn run_polling(self) -> Result<()> {
        let (mut application, bot) = self.into_parts();

        match bot.get_me().await {
            Ok(me) => {
                if let Some(username) = &me.user.username {
                    info!(username = %username, "Bot username set before polling");
                }
                application.set_bot_username(me.user.username.clone());
            }
            Err(e) => {
                warn!(error = %e, "get_me failed; command targets will not be checked");
            }
        }

        application
            .initialize()
            .await
            .context("Failed to load persisted bot data")?;

        let block = application.defaults().block();
        let application = Arc::new(application);
        let app = application.clone();

        let handler = dptree::endpoint(move |update: teloxide::types::Update| {
            let app = app.clone();
            async move {
                let core_update = TelegramUpdateWrapper(&update).to_core();
                if block {
                    process(app, core_update).await;
                } else {
                    tokio::spawn(process(app, core_update));
                }
                respond(())
            }
        });

        info!(block, "Start polling");
        Dispatcher::builder(bot, handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        application
            .shutdown()
            .await
            .context("Failed to persist bot data on shutdown")?;
        info!("Polling stopped");
        Ok(())
    }
}

async fn process(application: Arc<Application>, update: Update) {
    let update_id = update.id;
    if let Err(e) = application.process_update(update).await {
        error!(error = %e, update_id, "Update processing failed");
    }
}
