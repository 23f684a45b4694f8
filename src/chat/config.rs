//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and resolves it into
//! the client and session configuration.

use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::client::ClientConfig;
use crate::session::SessionConfig;

/// Backend address used when `--base-url` is not given.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Command-line arguments for the talk2me-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Where the chat backend is served.
    #[arrrg(optional, "Backend base URL (default: http://127.0.0.1:8000)", "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 30)", "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Perceptual delay before a reply is shown, in milliseconds.
    #[arrrg(optional, "Reply delay in milliseconds (default: 1000)", "MILLIS")]
    pub reply_delay_ms: Option<u64>,

    /// Start without the greeting message.
    #[arrrg(flag, "Do not show the greeting")]
    pub no_greeting: bool,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Resolved configuration for the chat application.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// How to reach the backend.
    pub client: ClientConfig,

    /// How the session paces and greets.
    pub session: SessionConfig,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    pub fn new() -> Self {
        Self {
            client: ClientConfig::new(DEFAULT_BASE_URL),
            session: SessionConfig::new(),
            use_color: true,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let mut client = ClientConfig::new(
            args.base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        );
        if let Some(secs) = args.timeout_secs {
            client = client.with_timeout(Duration::from_secs(secs));
        }

        let mut session = SessionConfig::new();
        if let Some(millis) = args.reply_delay_ms {
            session = session.with_reply_delay(Duration::from_millis(millis));
        }
        if args.no_greeting {
            session = session.without_greeting();
        }

        ChatConfig {
            client,
            session,
            use_color: !args.no_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_args_defaults() {
        let config = ChatConfig::from(ChatArgs::default());
        assert_eq!(config.client.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.client.timeout, Duration::from_secs(30));
        assert_eq!(config.session, SessionConfig::default());
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            base_url: Some("https://talk2me.example.com".to_string()),
            timeout_secs: Some(5),
            reply_delay_ms: Some(0),
            no_greeting: true,
            no_color: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.client.base_url, "https://talk2me.example.com");
        assert_eq!(config.client.timeout, Duration::from_secs(5));
        assert_eq!(config.session.reply_delay, Duration::ZERO);
        assert!(config.session.greeting.is_none());
        assert!(!config.use_color);
    }
}
