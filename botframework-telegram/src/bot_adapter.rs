//! Wraps teloxide::Bot and implements [`botframework_core::Bot`], applying the configured [`Defaults`]
//! to every outgoing message. Tests substitute another Bot impl.

use async_trait::async_trait;
use botframework_core::{Bot as CoreBot, Chat, Defaults, FrameworkError, Message, ParseMode, Result};
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, LinkPreviewOptions, MessageId, ParseMode as TgParseMode, ReplyParameters};

/// Parses a message id string into an i32. Used by reply_to.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| FrameworkError::Bot(format!("Invalid message_id for reply: {}", s)))
}

type SendMessageRequest = <teloxide::Bot as Requester>::SendMessage;

fn to_teloxide_parse_mode(mode: ParseMode) -> TgParseMode {
    match mode {
        ParseMode::Html => TgParseMode::Html,
        ParseMode::MarkdownV2 => TgParseMode::MarkdownV2,
    }
}

/// Thin wrapper around teloxide::Bot that implements botframework-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
    defaults: Defaults,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot, defaults: Defaults) -> Self {
        Self { bot, defaults }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }

    fn apply_defaults<R: SendMessageSetters>(&self, mut request: R) -> R {
        if let Some(mode) = self.defaults.parse_mode {
            request = request.parse_mode(to_teloxide_parse_mode(mode));
        }
        if let Some(disable) = self.defaults.disable_notification {
            request = request.disable_notification(disable);
        }
        if let Some(protect) = self.defaults.protect_content {
            request = request.protect_content(protect);
        }
        if let Some(disabled) = self.defaults.disable_web_page_preview {
            request = request.link_preview_options(LinkPreviewOptions {
                is_disabled: disabled,
                url: None,
                prefer_small_media: false,
                prefer_large_media: false,
                show_above_text: false,
            });
        }
        request
    }

    fn message_request(&self, chat_id: i64, text: &str) -> SendMessageRequest {
        self.apply_defaults(self.bot.send_message(ChatId(chat_id), text.to_string()))
    }

    /// With `quote` off this is a plain message to the same chat.
    fn reply_request(&self, message: &Message, text: &str) -> Result<SendMessageRequest> {
        let request = self.message_request(message.chat.id, text);
        if !self.defaults.quote() {
            return Ok(request);
        }
        let id = parse_message_id(&message.id)?;
        let reply = ReplyParameters {
            allow_sending_without_reply: self.defaults.allow_sending_without_reply,
            ..ReplyParameters::new(MessageId(id))
        };
        Ok(request.reply_parameters(reply))
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.message_request(chat.id, text)
            .await
            .map_err(|e| FrameworkError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.reply_request(message, text)?
            .await
            .map_err(|e| FrameworkError::Bot(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::requests::{HasPayload, Request};
    use teloxide::types::Recipient;

    #[test]
    fn test_adapter_new() {
        let adapter = TelegramBotAdapter::new(teloxide::Bot::new("dummy_token"), Defaults::default());
        assert_eq!(adapter.inner().token(), "dummy_token");
    }

    #[test]
    fn test_parse_message_id_valid() {
        assert_eq!(parse_message_id("123").unwrap(), 123);
        assert_eq!(parse_message_id("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_message_id_invalid() {
        assert!(parse_message_id("").is_err());
        assert!(parse_message_id("abc").is_err());
        assert!(parse_message_id("12.3").is_err());
    }

    #[test]
    fn test_parse_mode_mapping() {
        assert_eq!(to_teloxide_parse_mode(ParseMode::Html), TgParseMode::Html);
        assert_eq!(to_teloxide_parse_mode(ParseMode::MarkdownV2), TgParseMode::MarkdownV2);
    }

    fn message(id: &str) -> Message {
        Message {
            id: id.to_string(),
            user: None,
            chat: Chat {
                id: 5,
                chat_type: "private".to_string(),
            },
            text: Some("/ping".to_string()),
            created_at: chrono::Utc::now(),
            reply_to_message_id: None,
            is_caption: false,
        }
    }

    fn adapter(defaults: Defaults) -> TelegramBotAdapter {
        TelegramBotAdapter::new(teloxide::Bot::new("dummy_token"), defaults)
    }

    #[test]
    fn test_reply_quotes_by_default() {
        let defaults = Defaults {
            allow_sending_without_reply: Some(true),
            parse_mode: Some(ParseMode::Html),
            ..Defaults::default()
        };
        let request = adapter(defaults).reply_request(&message("7"), "pong").unwrap();
        let payload = request.payload_ref();

        let reply = payload.reply_parameters.as_ref().unwrap();
        assert_eq!(reply.message_id, MessageId(7));
        assert_eq!(reply.allow_sending_without_reply, Some(true));
        assert_eq!(payload.parse_mode, Some(TgParseMode::Html));
        assert_eq!(payload.text, "pong");
    }

    #[test]
    fn test_reply_without_quote_is_plain_message() {
        let defaults = Defaults {
            quote: Some(false),
            ..Defaults::default()
        };
        // Unparseable id is never read when quoting is off.
        let request = adapter(defaults).reply_request(&message("not-a-number"), "pong").unwrap();
        let payload = request.payload_ref();

        assert!(payload.reply_parameters.is_none());
        assert_eq!(payload.chat_id, Recipient::Id(ChatId(5)));
        assert_eq!(payload.text, "pong");
    }

    #[test]
    fn test_reply_with_invalid_id_fails_when_quoting() {
        let result = adapter(Defaults::default()).reply_request(&message("abc"), "pong");
        assert!(result.is_err());
    }
}
