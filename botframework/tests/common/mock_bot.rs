//! Mock implementation of [`botframework_core::Bot`] for integration tests.
//!
//! Records every outgoing text so tests can assert on what the handlers sent without hitting Telegram.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use botframework_core::{Bot, Chat, Message, Result};

/// One recorded `send_message` or `reply_to` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentRecord {
    pub chat_id: i64,
    pub text: String,
}

/// Mock Bot that appends every message to an in-memory log.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<SentRecord>>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Texts sent so far, in order.
    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|r| r.text).collect()
    }

    pub fn sent(&self) -> Vec<SentRecord> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, chat_id: i64, text: &str) {
        self.sent.lock().unwrap().push(SentRecord {
            chat_id,
            text: text.to_string(),
        });
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(chat.id, text);
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.record(message.chat.id, text);
        Ok(())
    }
}
