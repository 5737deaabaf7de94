//! Named handler registry filled by command modules before the application is built.

use std::collections::BTreeMap;
use std::sync::Arc;

use botframework_core::{
    Callback, CommandHandler, Dependencies, Handler, MessageFilter, MessageHandler,
};
use botframework_dispatch::DEFAULT_GROUP;
use tracing::debug;

/// A handler plus the dispatch group it should be attached to.
#[derive(Clone)]
pub struct RegisteredHandler {
    pub handler: Arc<dyn Handler>,
    pub group: Option<i32>,
}

impl RegisteredHandler {
    /// Dispatch group, [`DEFAULT_GROUP`] when none was given.
    pub fn group(&self) -> i32 {
        self.group.unwrap_or(DEFAULT_GROUP)
    }
}

/// Handlers registered by name, plus the typed dependencies their callbacks read.
///
/// Registering a name twice replaces the earlier entry.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: BTreeMap<String, RegisteredHandler>,
    dependencies: Dependencies,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_handler(
        &mut self,
        handler: Arc<dyn Handler>,
        name: impl Into<String>,
        group: Option<i32>,
    ) {
        let name = name.into();
        debug!(name = %name, handler = handler.name(), ?group, "Handler registered");
        self.handlers
            .insert(name, RegisteredHandler { handler, group });
    }

    /// Registers `callback` as the `/name` command.
    pub fn register_command_handler(
        &mut self,
        callback: Callback,
        name: impl Into<String>,
        group: Option<i32>,
    ) {
        let name = name.into();
        let handler = Arc::new(CommandHandler::new(name.clone(), callback));
        self.register_handler(handler, name, group);
    }

    /// Registers `callback` for messages accepted by `filter` (all messages when `None`).
    pub fn register_message_handler(
        &mut self,
        callback: Callback,
        name: impl Into<String>,
        filter: Option<MessageFilter>,
        group: Option<i32>,
    ) {
        let handler = Arc::new(MessageHandler::new(filter.unwrap_or_default(), callback));
        self.register_handler(handler, name, group);
    }

    /// Stores a value handlers can fetch with `Context::dependency`.
    pub fn provide<T: Send + Sync + 'static>(&mut self, value: T) {
        self.dependencies.insert(value);
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredHandler> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }

    pub fn into_parts(self) -> (BTreeMap<String, RegisteredHandler>, Dependencies) {
        (self.handlers, self.dependencies)
    }
}

/// Registers an `async fn(Update, Context) -> Result<()>` as a command handler.
///
/// The name defaults to the function's identifier and the group to none; both can be overridden:
///
/// ```ignore
/// register!(registry, ping);
/// register!(registry, ping, name = "pong", group = 5);
/// ```
#[macro_export]
macro_rules! register {
    (@opt $name:ident, $group:ident, name = $value:expr) => {
        $name = ::std::string::String::from($value);
    };
    (@opt $name:ident, $group:ident, group = $value:expr) => {
        $group = ::std::option::Option::Some($value);
    };
    ($registry:expr, $func:ident $(, $key:ident = $value:expr)* $(,)?) => {{
        #[allow(unused_mut)]
        let mut name = ::std::string::String::from(stringify!($func));
        #[allow(unused_mut)]
        let mut group: ::std::option::Option<i32> = ::std::option::Option::None;
        $( $crate::register!(@opt name, group, $key = $value); )*
        $registry.register_command_handler($crate::callback($func), name, group);
    }};
}
