//! # botframework-core
//!
//! Core types and traits: [`Update`], [`Bot`], [`Handler`] and the built-in handler kinds,
//! [`Context`] with shared [`BotData`], [`Defaults`], errors, and tracing initialization.
//! Transport-agnostic; used by botframework-dispatch and botframework-telegram.

pub mod bot;
pub mod context;
pub mod defaults;
pub mod error;
pub mod handler;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use context::{BotData, BotDataMap, Context, Dependencies};
pub use defaults::{Defaults, ParseMode};
pub use error::{FrameworkError, HandlerError, Result};
pub use handler::{
    callback, Callback, CommandHandler, Handler, MessageFilter, MessageHandler, TypeHandler,
};
pub use logger::{fallback_tracing, init_tracing, LoggingConfig};
pub use types::{
    Chat, HandlerResponse, Message, ParsedCommand, ToCoreMessage, ToCoreUpdate, ToCoreUser,
    Update, UpdateKind, User,
};
