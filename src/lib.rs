// Public modules
pub mod chat;
pub mod client;
pub mod crisis;
pub mod error;
pub mod observability;
pub mod resources;
pub mod session;
pub mod types;
pub mod utils;

// Re-exports
pub use client::{ChatClient, ClientConfig, HttpChatClient};
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use session::{
    APOLOGY_TEXT, ConversationSnapshot, PendingReply, ReplyOutcome, SessionConfig,
    SessionController,
};
pub use types::*;
