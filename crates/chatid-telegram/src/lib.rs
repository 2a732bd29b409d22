pub mod adapter;
pub mod commands;
pub mod context;
pub mod error;
pub mod handler;

pub use adapter::{schema, TelegramAdapter};
pub use commands::Command;
pub use context::{TelegramUpdate, UpdateContext};
pub use error::TelegramError;
pub use handler::{answer_help, answer_ids, render_ids};
