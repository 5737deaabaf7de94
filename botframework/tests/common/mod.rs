#![allow(dead_code)]

pub mod mock_bot;

use botframework_core::{Chat, Message, Update, UpdateKind};
use chrono::Utc;

pub fn text_update(id: i64, chat_id: i64, text: &str) -> Update {
    Update::from_message(
        id,
        Message {
            id: id.to_string(),
            user: None,
            chat: Chat {
                id: chat_id,
                chat_type: "private".to_string(),
            },
            text: Some(text.to_string()),
            created_at: Utc::now(),
            reply_to_message_id: None,
            is_caption: false,
        },
    )
}

/// An update with no chat (e.g. an inline query).
pub fn chatless_update(id: i64) -> Update {
    Update {
        id,
        kind: UpdateKind::Other("inline_query".to_string()),
        message: None,
        effective_chat: None,
        effective_user: None,
    }
}
