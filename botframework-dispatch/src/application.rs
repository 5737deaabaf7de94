use std::collections::BTreeMap;
use std::sync::Arc;

use botframework_core::{
    Bot, BotData, Context, Defaults, Dependencies, Handler, HandlerResponse, Result, Update,
};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

use crate::persistence::Persistence;

/// Group used when a handler is registered without one.
pub const DEFAULT_GROUP: i32 = 0;

/// Bot application: bot handle, dispatch table, shared bot data and optional persistence.
pub struct Application {
    bot: Arc<dyn Bot>,
    handlers: BTreeMap<i32, Vec<Arc<dyn Handler>>>,
    bot_data: BotData,
    persistence: Option<Arc<dyn Persistence>>,
    defaults: Arc<Defaults>,
    dependencies: Arc<Dependencies>,
    bot_username: Option<String>,
    /// Held across snapshot and store so writes land in snapshot order.
    persist_lock: Mutex<()>,
}

impl Application {
    /// Creates an application with an empty dispatch table and no persistence.
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self {
            bot,
            handlers: BTreeMap::new(),
            bot_data: BotData::new(),
            persistence: None,
            defaults: Arc::new(Defaults::default()),
            dependencies: Arc::new(Dependencies::default()),
            bot_username: None,
            persist_lock: Mutex::new(()),
        }
    }

    pub fn with_persistence(mut self, persistence: Arc<dyn Persistence>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = Arc::new(defaults);
        self
    }

    /// Replaces the dependencies handed to every handler context.
    pub fn set_dependencies(&mut self, dependencies: Dependencies) {
        self.dependencies = Arc::new(dependencies);
    }

    pub fn set_bot_username(&mut self, bot_username: Option<String>) {
        self.bot_username = bot_username;
    }

    pub fn bot(&self) -> &Arc<dyn Bot> {
        &self.bot
    }

    pub fn bot_data(&self) -> &BotData {
        &self.bot_data
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn has_persistence(&self) -> bool {
        self.persistence.is_some()
    }

    /// Appends `handler` to `group`. The same handler may be added more than once.
    pub fn add_handler(&mut self, handler: Arc<dyn Handler>, group: i32) {
        debug!(handler = handler.name(), group, "Adding handler");
        self.handlers.entry(group).or_default().push(handler);
    }

    /// Removes one occurrence of `handler` (by identity) from `group`. Returns whether it was present.
    pub fn remove_handler(&mut self, handler: &Arc<dyn Handler>, group: i32) -> bool {
        let Some(list) = self.handlers.get_mut(&group) else {
            return false;
        };
        let Some(pos) = list
            .iter()
            .position(|h| std::ptr::addr_eq(Arc::as_ptr(h), Arc::as_ptr(handler)))
        else {
            return false;
        };
        list.remove(pos);
        if list.is_empty() {
            self.handlers.remove(&group);
        }
        debug!(handler = handler.name(), group, "Removed handler");
        true
    }

    /// Handlers of `group` in dispatch order.
    pub fn handlers(&self, group: i32) -> &[Arc<dyn Handler>] {
        self.handlers.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty groups in ascending order.
    pub fn groups(&self) -> Vec<i32> {
        self.handlers.keys().copied().collect()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    /// Context handed to handlers for one update.
    pub fn context(&self) -> Context {
        Context::new(self.bot.clone(), self.bot_data.clone())
            .with_defaults(self.defaults.clone())
            .with_dependencies(self.dependencies.clone())
            .with_bot_username(self.bot_username.clone())
    }

    /// Loads persisted bot data, if persistence is configured. Call once before processing updates.
    pub async fn initialize(&self) -> Result<()> {
        if let Some(persistence) = &self.persistence {
            let data = persistence.load_bot_data().await?;
            info!(keys = data.len(), "Loaded persisted bot data");
            self.bot_data.replace(data).await;
        }
        Ok(())
    }

    /// Runs the update through the dispatch table, then persists bot data.
    /// Handler errors are logged and do not stop later groups; only persistence errors are returned.
    #[instrument(skip(self, update), fields(update_id = update.id, kind = %update.kind))]
    pub async fn process_update(&self, update: Update) -> Result<()> {
        let chat_id = update.effective_chat.as_ref().map(|c| c.id);
        let context = self.context();

        'groups: for (group, handlers) in &self.handlers {
            for handler in handlers {
                if !handler.check_update(&update, &context) {
                    continue;
                }
                debug!(handler = handler.name(), group, chat_id = ?chat_id, "step: handler processing");
                match handler.handle(&update, context.clone()).await {
                    Ok(HandlerResponse::Continue) => {}
                    Ok(HandlerResponse::Stop) => {
                        debug!(handler = handler.name(), group, "step: dispatch stopped by handler");
                        break 'groups;
                    }
                    Err(e) => {
                        error!(error = %e, handler = handler.name(), group, chat_id = ?chat_id, "Handler failed");
                    }
                }
                // First matching handler of a group wins.
                continue 'groups;
            }
        }

        self.update_persistence().await
    }

    /// Writes bot data to persistence, if configured.
    pub async fn update_persistence(&self) -> Result<()> {
        if let Some(persistence) = &self.persistence {
            let _guard = self.persist_lock.lock().await;
            let snapshot = self.bot_data.snapshot().await;
            persistence.store_bot_data(&snapshot).await?;
        }
        Ok(())
    }

    /// Final flush; call after polling stopped.
    pub async fn shutdown(&self) -> Result<()> {
        info!("Application shutting down");
        self.update_persistence().await
    }
}
