//! Per-invocation handler context: bot handle, shared bot data, command args, typed dependencies.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::{Mutex, MutexGuard};

use crate::bot::Bot;
use crate::defaults::Defaults;
use crate::error::{HandlerError, Result};

/// JSON object holding bot-wide state.
pub type BotDataMap = Map<String, Value>;

/// Bot-wide state shared by every handler invocation. Handlers may run concurrently, so every
/// read-modify-write must happen under one [`BotData::lock`].
#[derive(Clone, Default)]
pub struct BotData {
    inner: Arc<Mutex<BotDataMap>>,
}

impl BotData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: BotDataMap) -> Self {
        Self {
            inner: Arc::new(Mutex::new(map)),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, BotDataMap> {
        self.inner.lock().await
    }

    /// Clones the current contents (e.g. for persistence).
    pub async fn snapshot(&self) -> BotDataMap {
        self.inner.lock().await.clone()
    }

    /// Replaces the whole contents (e.g. after loading from persistence).
    pub async fn replace(&self, map: BotDataMap) {
        *self.inner.lock().await = map;
    }
}

/// Typed values provided at registration time and read by handlers, keyed by type.
#[derive(Clone, Default)]
pub struct Dependencies {
    values: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Dependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value`, replacing any previous value of the same type.
    pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) {
        self.values.insert(TypeId::of::<T>(), Arc::new(value));
    }

    pub fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.values
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|value| value.downcast::<T>().ok())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Context passed to every handler callback.
#[derive(Clone)]
pub struct Context {
    pub bot: Arc<dyn Bot>,
    pub bot_data: BotData,
    /// Arguments after the command name (command handlers only).
    pub args: Vec<String>,
    bot_username: Option<String>,
    defaults: Arc<Defaults>,
    dependencies: Arc<Dependencies>,
}

impl Context {
    pub fn new(bot: Arc<dyn Bot>, bot_data: BotData) -> Self {
        Self {
            bot,
            bot_data,
            args: Vec::new(),
            bot_username: None,
            defaults: Arc::new(Defaults::default()),
            dependencies: Arc::new(Dependencies::default()),
        }
    }

    pub fn with_defaults(mut self, defaults: Arc<Defaults>) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Arc<Dependencies>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_bot_username(mut self, bot_username: Option<String>) -> Self {
        self.bot_username = bot_username;
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// The bot's own username, known once the transport has asked the server.
    pub fn bot_username(&self) -> Option<&str> {
        self.bot_username.as_deref()
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Returns the dependency of type `T` or [`HandlerError::MissingDependency`].
    pub fn dependency<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        self.dependencies
            .get::<T>()
            .ok_or_else(|| HandlerError::MissingDependency(type_name::<T>()).into())
    }
}
