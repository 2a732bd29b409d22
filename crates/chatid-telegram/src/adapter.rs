//! Telegram channel adapter.
//!
//! Wraps a teloxide `Bot` + `Dispatcher` and drives the long-polling event loop
//! until Ctrl-C. Long polling: no public URL required.

use teloxide::dispatching::{DpHandlerDescription, UpdateHandler};
use teloxide::dptree::di::DependencyMap;
use teloxide::dptree::Handler;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use chatid_core::config::TelegramConfig;

use crate::commands::Command;
use crate::error::TelegramError;
use crate::handler::handle_command;

/// Environment variable consulted when the config carries no token.
pub const TOKEN_ENV: &str = "TELOXIDE_TOKEN";

pub struct TelegramAdapter {
    bot: Bot,
    config: TelegramConfig,
}

impl TelegramAdapter {
    /// Build the adapter, resolving the bot token from config or `TELOXIDE_TOKEN`.
    pub fn new(config: &TelegramConfig) -> Result<Self, TelegramError> {
        let token = resolve_token(
            config.bot_token.as_deref(),
            std::env::var(TOKEN_ENV).ok().as_deref(),
        )?;
        Ok(Self {
            bot: Bot::new(token),
            config: config.clone(),
        })
    }

    /// Publish the command list so clients show it in the command menu.
    pub async fn register_commands(&self) -> Result<(), TelegramError> {
        self.bot.set_my_commands(Command::bot_commands()).await?;
        Ok(())
    }

    /// Connect to Telegram and drive the long-polling loop.
    ///
    /// Returns once the dispatcher has shut down after Ctrl-C.
    pub async fn run(self) {
        if self.config.register_commands {
            match self.register_commands().await {
                Ok(()) => info!("Telegram: command list published"),
                Err(e) => warn!(error = %e, "Telegram: failed to publish command list"),
            }
        }

        info!("Telegram: starting long-polling dispatcher");

        Dispatcher::builder(self.bot, schema())
            .dependencies(dptree::deps![self.config])
            .default_handler(|_upd| async {})
            .error_handler(LoggingErrorHandler::with_custom_text(
                "Telegram: command handler failed",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Telegram: dispatcher stopped");
    }
}

/// Dispatcher handler tree: every [`Command`] in a message or channel post.
pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    command_updates(dptree::endpoint(handle_command))
}

/// Route command-bearing messages and channel posts into `endpoint`.
///
/// Channel posts carry no `from`, so they are where `/id` sees no sender.
fn command_updates<Out>(
    endpoint: Handler<'static, DependencyMap, Out, DpHandlerDescription>,
) -> Handler<'static, DependencyMap, Out, DpHandlerDescription>
where
    Out: Send + Sync + 'static,
{
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .chain(endpoint.clone()),
        )
        .branch(
            Update::filter_channel_post()
                .filter_command::<Command>()
                .chain(endpoint),
        )
}

/// Pick the configured token, else the environment one. Blank tokens count as absent.
fn resolve_token(
    configured: Option<&str>,
    from_env: Option<&str>,
) -> Result<String, TelegramError> {
    non_blank(configured)
        .or_else(|| non_blank(from_env))
        .map(str::to_string)
        .ok_or(TelegramError::NoToken)
}

fn non_blank(token: Option<&str>) -> Option<&str> {
    token.map(str::trim).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::ControlFlow;

    use teloxide::types::Me;

    use crate::context::{TelegramUpdate, UpdateContext};

    type Seen = (Command, Option<i64>, Option<i64>);

    fn me() -> Me {
        serde_json::from_value(serde_json::json!({
            "id": 5000,
            "is_bot": true,
            "first_name": "chatid",
            "username": "chatid_bot",
            "can_join_groups": true,
            "can_read_all_group_messages": false,
            "supports_inline_queries": false,
            "can_connect_to_business": false,
            "has_main_web_app": false
        }))
        .unwrap()
    }

    fn group_message(text: &str) -> serde_json::Value {
        serde_json::json!({
            "message_id": 10,
            "date": 1_700_000_000,
            "chat": { "id": -100123, "type": "supergroup", "title": "group" },
            "from": { "id": 42, "is_bot": false, "first_name": "Ann" },
            "text": text,
            "entities": [{ "type": "bot_command", "offset": 0, "length": text.len() }]
        })
    }

    fn channel_post(text: &str) -> serde_json::Value {
        serde_json::json!({
            "message_id": 11,
            "date": 1_700_000_000,
            "chat": { "id": -1001234567890_i64, "type": "channel", "title": "news" },
            "sender_chat": { "id": -1001234567890_i64, "type": "channel", "title": "news" },
            "text": text,
            "entities": [{ "type": "bot_command", "offset": 0, "length": text.len() }]
        })
    }

    fn update(kind: &str, payload: serde_json::Value) -> Update {
        let mut raw = serde_json::json!({ "update_id": 1 });
        raw[kind] = payload;
        serde_json::from_str(&raw.to_string()).unwrap()
    }

    /// Run `update` through the command tree with an endpoint that records
    /// what `/id` would see.
    async fn route(update: Update) -> Option<Seen> {
        let tree = command_updates(dptree::endpoint(
            |bot: Bot, msg: Message, cmd: Command| async move {
                let ctx = TelegramUpdate::new(bot, msg);
                (cmd, ctx.sender_id(), ctx.chat_id())
            },
        ));
        let deps = dptree::deps![update, me(), Bot::new("0:test")];
        match tree.dispatch(deps).await {
            ControlFlow::Break(seen) => Some(seen),
            ControlFlow::Continue(_) => None,
        }
    }

    #[tokio::test]
    async fn group_message_reaches_id_with_sender() {
        let seen = route(update("message", group_message("/id"))).await;
        assert_eq!(seen, Some((Command::Id, Some(42), Some(-100123))));
    }

    #[tokio::test]
    async fn channel_post_reaches_id_without_sender() {
        let seen = route(update("channel_post", channel_post("/id"))).await;
        assert_eq!(seen, Some((Command::Id, None, Some(-1001234567890))));
    }

    #[tokio::test]
    async fn command_for_another_bot_is_not_routed() {
        let seen = route(update("message", group_message("/id@other_bot"))).await;
        assert_eq!(seen, None);
    }

    #[tokio::test]
    async fn plain_text_is_not_routed() {
        let mut msg = group_message("hello");
        msg["entities"] = serde_json::json!([]);
        assert_eq!(route(update("message", msg)).await, None);
    }

    #[tokio::test]
    async fn edited_message_is_not_routed() {
        let seen = route(update("edited_message", group_message("/id"))).await;
        assert_eq!(seen, None);
    }

    #[test]
    fn configured_token_wins() {
        let token = resolve_token(Some("cfg"), Some("env")).unwrap();
        assert_eq!(token, "cfg");
    }

    #[test]
    fn falls_back_to_env_token() {
        let token = resolve_token(None, Some("env")).unwrap();
        assert_eq!(token, "env");
    }

    #[test]
    fn no_token_is_an_error() {
        assert!(matches!(resolve_token(None, None), Err(TelegramError::NoToken)));
    }

    #[test]
    fn blank_configured_token_defers_to_env() {
        let token = resolve_token(Some(""), Some(" env ")).unwrap();
        assert_eq!(token, "env");
    }

    #[test]
    fn blank_token_is_an_error() {
        assert!(matches!(
            resolve_token(Some("  "), None),
            Err(TelegramError::NoToken)
        ));
    }
}
