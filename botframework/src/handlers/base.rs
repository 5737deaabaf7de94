//! Catch-all handler that logs every incoming update at a configured level.

use std::sync::Arc;

use botframework_core::{callback, Context, Handler, Result, TypeHandler, Update};

use crate::config::LogLevel;

/// Emits one event at a level chosen at runtime; `tracing` macros need the level as a constant.
macro_rules! event_at {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            LogLevel::Trace => tracing::trace!($($arg)+),
            LogLevel::Debug => tracing::debug!($($arg)+),
            LogLevel::Info => tracing::info!($($arg)+),
            LogLevel::Warning => tracing::warn!($($arg)+),
            LogLevel::Error | LogLevel::Critical => tracing::error!($($arg)+),
        }
    };
}

/// A [`TypeHandler`] running [`log_update`] at `level`. Never stops dispatch.
pub fn base_handler(level: LogLevel) -> Arc<dyn Handler> {
    Arc::new(TypeHandler::new(callback(move |update, context| {
        log_update(level, update, context)
    })))
}

/// Logs the update with its chat, sender and text. The message timestamp is rendered in the
/// configured `tzinfo`.
pub async fn log_update(level: LogLevel, update: Update, context: Context) -> Result<()> {
    let chat_id = update.effective_chat.as_ref().map(|chat| chat.id);
    let user_id = update.effective_user.as_ref().map(|user| user.id);
    let message = update.message.as_ref();
    let text = message.and_then(|m| m.text.as_deref()).unwrap_or("");
    let sent_at = message
        .map(|m| context.defaults().format_timestamp(m.created_at))
        .unwrap_or_default();

    event_at!(
        level,
        update_id = update.id,
        kind = %update.kind,
        chat_id = ?chat_id,
        user_id = ?user_id,
        sent_at = %sent_at,
        text = %text,
        "Incoming update"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use botframework_core::{Bot, BotData, Chat, Defaults, HandlerResponse, Message};
    use chrono::Utc;

    struct SilentBot;

    #[async_trait]
    impl Bot for SilentBot {
        async fn send_message(&self, _chat: &Chat, _text: &str) -> Result<()> {
            Ok(())
        }

        async fn reply_to(&self, _message: &Message, _text: &str) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_base_handler_accepts_everything_and_continues() {
        let context = Context::new(Arc::new(SilentBot), BotData::new())
            .with_defaults(Arc::new(Defaults::default()));
        let update = Update::from_message(
            9,
            Message {
                id: "3".to_string(),
                user: None,
                chat: Chat {
                    id: 1,
                    chat_type: "private".to_string(),
                },
                text: Some("hello".to_string()),
                created_at: Utc::now(),
                reply_to_message_id: None,
                is_caption: false,
            },
        );

        for level in [LogLevel::Trace, LogLevel::Warning, LogLevel::Critical] {
            let handler = base_handler(level);
            assert!(handler.check_update(&update, &context));
            let response = handler.handle(&update, context.clone()).await.unwrap();
            assert_eq!(response, HandlerResponse::Continue);
        }
    }
}
