//! Bot abstraction for sending messages.
//!
//! [`Bot`] is transport-agnostic; `botframework-telegram` implements it via teloxide and tests substitute a mock.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram) and apply
/// any configured [`Defaults`](crate::Defaults).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a message in reply to `message` (same chat). Whether the original is quoted depends on defaults.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
}
