//! Telegram front-end built on teloxide.
//!
//! Owns per-chat session state and routes raw updates to the engine entry
//! points; all document and retrieval semantics live below this crate.

pub mod bot;
pub mod keyboard;
pub mod session;

pub use bot::{BotSettings, run};
pub use session::SessionState;
