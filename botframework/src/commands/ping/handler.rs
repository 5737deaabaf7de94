use std::time::Duration;

use botframework_core::{Context, HandlerError, Result, Update};
use serde_json::{json, Value};
use tracing::{debug, instrument};

use super::config::PingConfig;

/// Bumps the stored ping counter and returns the value before the bump (1 on first use).
async fn next_ping_number(context: &Context) -> Result<u64> {
    let mut data = context.bot_data.lock().await;
    let entry = data
        .entry(super::NAME)
        .or_insert_with(|| json!({ "count": 1 }));
    let Value::Object(state) = entry else {
        return Err(HandlerError::State(format!("bot_data.{} is not an object", super::NAME)).into());
    };
    let count = state.get("count").and_then(Value::as_u64).unwrap_or(1);
    state.insert("count".to_string(), json!(count + 1));
    Ok(count)
}

/// `/ping`: replies "Ping...", waits `wait_time` seconds, then replies "Pong no N!".
/// The counter is bumped even when the update has no chat to answer in.
#[instrument(skip_all, fields(update_id = update.id))]
pub async fn ping(update: Update, context: Context) -> Result<()> {
    let config = context.dependency::<PingConfig>()?;
    let ping_no = next_ping_number(&context).await?;
    debug!(ping_no, "Ping counted");

    let Some(chat) = update.effective_chat.as_ref() else {
        return Ok(());
    };
    context.bot.send_message(chat, "Ping...").await?;
    tokio::time::sleep(Duration::from_secs(config.wait_time)).await;
    context
        .bot
        .send_message(chat, &format!("Pong no {}!", ping_no))
        .await
}
