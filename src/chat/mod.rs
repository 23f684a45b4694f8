//! Terminal front-end for a Talk2Me session.
//!
//! This module provides the pieces the `talk2me-chat` binary is built from:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`commands`]: slash command parsing
//! - [`render`]: plain-text rendering of messages, alerts and resources

mod commands;
mod config;
mod render;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig, DEFAULT_BASE_URL};
pub use render::{PlainTextRenderer, Renderer};
