pub mod config;
pub mod error;

pub use config::{ChatIdConfig, TelegramConfig};
pub use error::{ChatIdError, Result};
