//! Core types: user, chat, message, update, handler response, and the converter traits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User identity (id, username, names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (private, group, supergroup or channel) identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// A single incoming message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    /// Sender; `None` for channel posts.
    pub user: Option<User>,
    pub chat: Chat,
    /// Text or caption; `None` for media without caption, stickers, service messages.
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reply_to_message_id: Option<String>,
    /// `text` holds a media caption. Captions are never parsed as commands.
    #[serde(default)]
    pub is_caption: bool,
}

/// A `/command@target arg1 arg2` parsed from message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Command name without the leading slash, lowercased.
    pub name: String,
    /// Bot username after `@`, if present.
    pub target: Option<String>,
    pub args: Vec<String>,
}

impl Message {
    /// Parses the message text as a bot command. Returns `None` for captions, when the text does not
    /// start with `/`, or when the command name is empty (`/`, `/ ping`, `/@bot`).
    pub fn command(&self) -> Option<ParsedCommand> {
        if self.is_caption {
            return None;
        }
        let text = self.text.as_deref()?;
        let rest = text.strip_prefix('/')?;
        let (head, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        if head.is_empty() {
            return None;
        }
        let (name, target) = match head.split_once('@') {
            Some((name, target)) => (name, Some(target.to_string())),
            None => (head, None),
        };
        if name.is_empty() {
            return None;
        }
        Some(ParsedCommand {
            name: name.to_lowercase(),
            target,
            args: tail.split_whitespace().map(str::to_string).collect(),
        })
    }

    pub fn is_command(&self) -> bool {
        self.command().is_some()
    }
}

/// Kind of an incoming update. Only the kinds handlers discriminate on are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateKind {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    CallbackQuery,
    Other(String),
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateKind::Message => f.write_str("message"),
            UpdateKind::EditedMessage => f.write_str("edited_message"),
            UpdateKind::ChannelPost => f.write_str("channel_post"),
            UpdateKind::EditedChannelPost => f.write_str("edited_channel_post"),
            UpdateKind::CallbackQuery => f.write_str("callback_query"),
            UpdateKind::Other(kind) => f.write_str(kind),
        }
    }
}

/// An incoming update with its effective chat, user and message resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub id: i64,
    pub kind: UpdateKind,
    pub message: Option<Message>,
    pub effective_chat: Option<Chat>,
    pub effective_user: Option<User>,
}

impl Update {
    /// Builds a `message` update; effective chat and user come from the message.
    pub fn from_message(id: i64, message: Message) -> Self {
        Self::with_kind(id, UpdateKind::Message, message)
    }

    /// Builds an update of the given kind carrying `message`.
    pub fn with_kind(id: i64, kind: UpdateKind, message: Message) -> Self {
        Self {
            id,
            kind,
            effective_chat: Some(message.chat.clone()),
            effective_user: message.user.clone(),
            message: Some(message),
        }
    }

    /// Returns the message when this update is a new or edited message (not a channel post).
    pub fn chat_message(&self) -> Option<&Message> {
        match self.kind {
            UpdateKind::Message | UpdateKind::EditedMessage => self.message.as_ref(),
            _ => None,
        }
    }
}

/// Result of a handler for the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Continue with the next group.
    Continue,
    /// Stop processing this update; later groups are skipped.
    Stop,
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Converts a transport-specific update type to core [`Update`].
pub trait ToCoreUpdate: Send + Sync {
    fn to_core(&self) -> Update;
}
