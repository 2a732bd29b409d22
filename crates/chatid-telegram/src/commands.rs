//! Commands registered with the dispatcher.

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "show your user ID and this chat's ID.")]
    Id,
    #[command(description = "display this text.")]
    Help,
}
