use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Rendered in place of an identifier the update does not carry.
pub const DEFAULT_MISSING_ID_PLACEHOLDER: &str = "unknown";

/// Prefix for environment overrides. Nested keys use `__`,
/// e.g. `CHATID_TELEGRAM__BOT_TOKEN`.
pub const ENV_PREFIX: &str = "CHATID_";

/// Top-level config (chatid.toml + CHATID_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatIdConfig {
    #[serde(default)]
    pub telegram: TelegramConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token. When unset the adapter falls back to `TELOXIDE_TOKEN`.
    #[serde(default)]
    pub bot_token: Option<String>,
    /// Text shown for a sender or chat id that is absent from the update.
    #[serde(default = "default_placeholder")]
    pub missing_id_placeholder: String,
    /// Publish the command list via `setMyCommands` on startup.
    #[serde(default = "bool_true")]
    pub register_commands: bool,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            missing_id_placeholder: default_placeholder(),
            register_commands: true,
        }
    }
}

fn default_placeholder() -> String {
    DEFAULT_MISSING_ID_PLACEHOLDER.to_string()
}

fn bool_true() -> bool {
    true
}

impl ChatIdConfig {
    /// Load config from a TOML file with CHATID_* env var overrides.
    ///
    /// Uses the explicit path when given, otherwise `~/.chatid/chatid.toml`.
    /// A missing file is not an error: every field has a default.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: ChatIdConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| crate::error::ChatIdError::Config(e.to_string()))?;

        Ok(config)
    }
}

pub fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.chatid/chatid.toml", home)
}
