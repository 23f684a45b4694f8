//! Conversation state and the controller that owns it.
//!
//! - [`config`]: perceptual delay and greeting settings
//! - [`conversation`]: the in-memory conversation and its snapshots
//! - [`controller`]: submission lifecycle, crisis merging, disposal

mod config;
mod controller;
mod conversation;

pub use config::{APOLOGY_TEXT, DEFAULT_GREETING, DEFAULT_REPLY_DELAY, SessionConfig};
pub use controller::{PendingReply, ReplyOutcome, SessionController};
pub use conversation::ConversationSnapshot;
