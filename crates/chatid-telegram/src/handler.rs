//! Command handlers registered in the teloxide Dispatcher.

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::debug;

use chatid_core::config::TelegramConfig;

use crate::commands::Command;
use crate::context::{TelegramUpdate, UpdateContext};

/// Format the `/id` reply.
///
/// An absent identifier is rendered as `placeholder`.
pub fn render_ids(sender_id: Option<i64>, chat_id: Option<i64>, placeholder: &str) -> String {
    format!(
        "User ID: {}\nChat ID: {}",
        id_or(sender_id, placeholder),
        id_or(chat_id, placeholder)
    )
}

fn id_or(id: Option<i64>, placeholder: &str) -> String {
    match id {
        Some(id) => id.to_string(),
        None => placeholder.to_string(),
    }
}

/// Reply to `/id` with the sender's and the chat's identifiers.
///
/// Sends exactly one message. A failed send is returned as-is; retrying and
/// logging are left to the dispatcher.
pub async fn answer_ids<C>(ctx: &C, placeholder: &str) -> Result<(), C::Error>
where
    C: UpdateContext + ?Sized,
{
    let text = render_ids(ctx.sender_id(), ctx.chat_id(), placeholder);
    ctx.reply(text).await
}

/// Reply to `/help` with the generated command list.
pub async fn answer_help<C>(ctx: &C) -> Result<(), C::Error>
where
    C: UpdateContext + ?Sized,
{
    ctx.reply(Command::descriptions().to_string()).await
}

/// Dispatcher endpoint for every parsed [`Command`].
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    config: TelegramConfig,
) -> ResponseResult<()> {
    let update = TelegramUpdate::new(bot, msg);
    debug!(
        command = ?cmd,
        sender_id = ?update.sender_id(),
        chat_id = ?update.chat_id(),
        "telegram: dispatching command"
    );

    match cmd {
        Command::Id => answer_ids(&update, &config.missing_id_placeholder).await,
        Command::Help => answer_help(&update).await,
    }
}
