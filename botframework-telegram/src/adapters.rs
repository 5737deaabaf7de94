//! Adapters from Telegram (teloxide) types to botframework_core types.
//! Depends only on teloxide and botframework_core type definitions.

use botframework_core::{Chat, Message, ToCoreMessage, ToCoreUpdate, ToCoreUser, Update, UpdateKind, User};
use teloxide::types::UpdateKind as TgUpdateKind;

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            is_bot: self.0.is_bot,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Converts a teloxide Chat to core [`Chat`].
pub fn to_core_chat(chat: &teloxide::types::Chat) -> Chat {
    let chat_type = if chat.is_private() {
        "private"
    } else if chat.is_group() {
        "group"
    } else if chat.is_supergroup() {
        "supergroup"
    } else if chat.is_channel() {
        "channel"
    } else {
        "unknown"
    };
    Chat {
        id: chat.id.0,
        chat_type: chat_type.to_string(),
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: self.0.from.as_ref().map(|u| TelegramUserWrapper(u).to_core()),
            chat: to_core_chat(&self.0.chat),
            text: self
                .0
                .text()
                .or_else(|| self.0.caption())
                .map(|s| s.to_string()),
            created_at: self.0.date,
            reply_to_message_id: self.0.reply_to_message().map(|msg| msg.id.to_string()),
            is_caption: self.0.text().is_none() && self.0.caption().is_some(),
        }
    }
}

/// Wraps a teloxide Update for conversion to core [`Update`].
pub struct TelegramUpdateWrapper<'a>(pub &'a teloxide::types::Update);

impl<'a> ToCoreUpdate for TelegramUpdateWrapper<'a> {
    fn to_core(&self) -> Update {
        let (kind, message) = match &self.0.kind {
            TgUpdateKind::Message(m) => (UpdateKind::Message, Some(m)),
            TgUpdateKind::EditedMessage(m) => (UpdateKind::EditedMessage, Some(m)),
            TgUpdateKind::ChannelPost(m) => (UpdateKind::ChannelPost, Some(m)),
            TgUpdateKind::EditedChannelPost(m) => (UpdateKind::EditedChannelPost, Some(m)),
            TgUpdateKind::CallbackQuery(_) => (UpdateKind::CallbackQuery, None),
            _ => (UpdateKind::Other("other".to_string()), None),
        };
        Update {
            id: self.0.id.0 as i64,
            kind,
            message: message.map(|m| TelegramMessageWrapper(m).to_core()),
            effective_chat: self.0.chat().map(to_core_chat),
            effective_user: self.0.from().map(|u| TelegramUserWrapper(u).to_core()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: TelegramUserWrapper converts teloxide User to core User with correct id, username, first_name, last_name.**
    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let wrapper = TelegramUserWrapper(&user);
        let core_user = wrapper.to_core();

        assert_eq!(core_user.id, 123);
        assert!(!core_user.is_bot);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.first_name, Some("Test".to_string()));
        assert_eq!(core_user.last_name, Some("User".to_string()));
    }

    fn message_from_json(json: &str) -> teloxide::types::Message {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_caption_is_flagged_and_not_a_command() {
        let message = message_from_json(
            r#"{
                "message_id": 5,
                "date": 1700000000,
                "chat": {"id": 42, "type": "private", "first_name": "Test"},
                "photo": [{"file_id": "f", "file_unique_id": "u", "width": 1, "height": 1, "file_size": 10}],
                "caption": "/ping"
            }"#,
        );

        let core = TelegramMessageWrapper(&message).to_core();
        assert_eq!(core.text.as_deref(), Some("/ping"));
        assert!(core.is_caption);
        assert!(core.command().is_none());
    }

    #[test]
    fn test_text_command_is_parsed() {
        let message = message_from_json(
            r#"{
                "message_id": 6,
                "date": 1700000000,
                "chat": {"id": 42, "type": "private", "first_name": "Test"},
                "text": "/ping"
            }"#,
        );

        let core = TelegramMessageWrapper(&message).to_core();
        assert!(!core.is_caption);
        assert_eq!(core.command().map(|c| c.name), Some("ping".to_string()));
    }
}
