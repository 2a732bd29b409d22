//! Per-update context handed to command handlers.
//!
//! `UpdateContext` is the seam between teloxide and the handlers: it exposes
//! the two identifiers a handler may read and the single reply operation it
//! may perform. `TelegramUpdate` is the production implementation.

use async_trait::async_trait;
use teloxide::prelude::*;

/// One incoming command, as seen by a handler.
#[async_trait]
pub trait UpdateContext: Send + Sync {
    type Error: Send;

    /// Identifier of the user who sent the command, if the update carries one.
    fn sender_id(&self) -> Option<i64>;

    /// Identifier of the chat the command was sent in, if known.
    fn chat_id(&self) -> Option<i64>;

    /// Send `text` back to the chat the update came from.
    async fn reply(&self, text: String) -> Result<(), Self::Error>;
}

/// A teloxide `Message` paired with the `Bot` that received it.
#[derive(Clone)]
pub struct TelegramUpdate {
    bot: Bot,
    msg: Message,
}

impl TelegramUpdate {
    pub fn new(bot: Bot, msg: Message) -> Self {
        Self { bot, msg }
    }
}

#[async_trait]
impl UpdateContext for TelegramUpdate {
    type Error = teloxide::RequestError;

    /// `None` for channel posts, which carry `sender_chat` instead of `from`.
    fn sender_id(&self) -> Option<i64> {
        self.msg
            .from
            .as_ref()
            .and_then(|u| i64::try_from(u.id.0).ok())
    }

    fn chat_id(&self) -> Option<i64> {
        Some(self.msg.chat.id.0)
    }

    async fn reply(&self, text: String) -> Result<(), Self::Error> {
        self.bot.send_message(self.msg.chat.id, text).await?;
        Ok(())
    }
}
