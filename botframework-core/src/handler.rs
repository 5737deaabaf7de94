//! Handler trait and the built-in handler kinds: command, message and catch-all.
//!
//! A handler decides with [`Handler::check_update`] whether it wants an update, then
//! [`Handler::handle`] runs it. Built-in kinds wrap a [`Callback`], the async function a command
//! module provides.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};

use crate::context::Context;
use crate::error::Result;
use crate::types::{HandlerResponse, Message, Update};

/// Async callback invoked with the update and a per-invocation context.
pub type Callback = Arc<dyn Fn(Update, Context) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// Boxes an `async fn(Update, Context) -> Result<()>` (or equivalent closure) into a [`Callback`].
pub fn callback<F, Fut>(f: F) -> Callback
where
    F: Fn(Update, Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    Arc::new(move |update: Update, context: Context| f(update, context).boxed())
}

/// A unit of logic invoked in response to an update.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Label used in logs.
    fn name(&self) -> &str;

    /// Whether this handler wants `update`. Must not block.
    fn check_update(&self, update: &Update, context: &Context) -> bool;

    /// Processes the update. Called only after `check_update` returned true.
    async fn handle(&self, update: &Update, context: Context) -> Result<HandlerResponse>;
}

/// Handles `/command` messages (new or edited). Matching is case-insensitive; `/command@bot` matches
/// only when `bot` is this bot's username or the username is not known yet.
pub struct CommandHandler {
    command: String,
    label: String,
    callback: Callback,
}

impl CommandHandler {
    pub fn new(command: impl Into<String>, callback: Callback) -> Self {
        let command = command.into().to_lowercase();
        let label = format!("command:/{}", command);
        Self {
            command,
            label,
            callback,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

#[async_trait]
impl Handler for CommandHandler {
    fn name(&self) -> &str {
        &self.label
    }

    fn check_update(&self, update: &Update, context: &Context) -> bool {
        let Some(parsed) = update.chat_message().and_then(Message::command) else {
            return false;
        };
        if parsed.name != self.command {
            return false;
        }
        match (parsed.target.as_deref(), context.bot_username()) {
            (Some(target), Some(me)) => target.eq_ignore_ascii_case(me),
            _ => true,
        }
    }

    async fn handle(&self, update: &Update, context: Context) -> Result<HandlerResponse> {
        let args = update
            .chat_message()
            .and_then(Message::command)
            .map(|parsed| parsed.args)
            .unwrap_or_default();
        (self.callback)(update.clone(), context.with_args(args)).await?;
        Ok(HandlerResponse::Continue)
    }
}

/// Which messages a [`MessageHandler`] accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageFilter {
    /// Any new or edited message.
    #[default]
    All,
    /// Messages carrying text (or a caption).
    Text,
    /// Text messages that are not bot commands.
    NonCommandText,
    /// Bot commands.
    Command,
}

impl MessageFilter {
    pub fn matches(&self, message: &Message) -> bool {
        match self {
            MessageFilter::All => true,
            MessageFilter::Text => message.text.is_some(),
            MessageFilter::NonCommandText => message.text.is_some() && !message.is_command(),
            MessageFilter::Command => message.is_command(),
        }
    }
}

/// Handles new or edited messages accepted by a [`MessageFilter`].
pub struct MessageHandler {
    filter: MessageFilter,
    label: String,
    callback: Callback,
}

impl MessageHandler {
    pub fn new(filter: MessageFilter, callback: Callback) -> Self {
        Self {
            label: format!("message:{:?}", filter),
            filter,
            callback,
        }
    }
}

#[async_trait]
impl Handler for MessageHandler {
    fn name(&self) -> &str {
        &self.label
    }

    fn check_update(&self, update: &Update, _context: &Context) -> bool {
        update
            .chat_message()
            .map(|message| self.filter.matches(message))
            .unwrap_or(false)
    }

    async fn handle(&self, update: &Update, context: Context) -> Result<HandlerResponse> {
        (self.callback)(update.clone(), context).await?;
        Ok(HandlerResponse::Continue)
    }
}

/// Handles every update regardless of kind.
pub struct TypeHandler {
    callback: Callback,
}

impl TypeHandler {
    pub fn new(callback: Callback) -> Self {
        Self { callback }
    }
}

#[async_trait]
impl Handler for TypeHandler {
    fn name(&self) -> &str {
        "type:update"
    }

    fn check_update(&self, _update: &Update, _context: &Context) -> bool {
        true
    }

    async fn handle(&self, update: &Update, context: Context) -> Result<HandlerResponse> {
        (self.callback)(update.clone(), context).await?;
        Ok(HandlerResponse::Continue)
    }
}
