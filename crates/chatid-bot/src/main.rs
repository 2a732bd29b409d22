use anyhow::Context;
use clap::Parser;
use tracing::info;

use chatid_core::config::ChatIdConfig;
use chatid_telegram::TelegramAdapter;

/// Telegram bot that answers /id with the caller's user ID and the chat ID.
#[derive(Parser, Debug)]
#[command(name = "chatid", version)]
struct Args {
    /// Path to chatid.toml (default: ~/.chatid/chatid.toml).
    #[arg(short, long, env = "CHATID_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatid_bot=info,chatid_telegram=info".into()),
        )
        .init();

    let args = Args::parse();

    // explicit path > CHATID_CONFIG env > ~/.chatid/chatid.toml
    let config = ChatIdConfig::load(args.config.as_deref()).context("failed to load config")?;

    let adapter =
        TelegramAdapter::new(&config.telegram).context("failed to start Telegram adapter")?;

    info!(
        register_commands = config.telegram.register_commands,
        "chatid bot starting"
    );
    adapter.run().await;

    info!("chatid bot stopped");
    Ok(())
}
