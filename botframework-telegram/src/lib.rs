//! # botframework-telegram
//!
//! Telegram transport: adapters from teloxide types, [`botframework_core::Bot`] implementation with
//! defaults, [`ApplicationBuilder`], and the long-polling runner ([`TelegramApplication::run_polling`]).

mod adapters;
mod bot_adapter;
mod builder;
mod runner;

pub use adapters::{to_core_chat, TelegramMessageWrapper, TelegramUpdateWrapper, TelegramUserWrapper};
pub use bot_adapter::{parse_message_id, TelegramBotAdapter};
pub use builder::{ApplicationBuilder, TelegramApplication};
