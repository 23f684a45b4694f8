//! Configuration for a chat session.

use std::time::Duration;

/// How long a reply is held back before it becomes visible.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_secs(1);

/// The bot's opening line.
pub const DEFAULT_GREETING: &str =
    "Hey! I'm Talk2Me, your health buddy. What's on your mind today?";

/// Shown in place of a reply whenever the backend cannot be used.
pub const APOLOGY_TEXT: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";

/// Configuration for a [`SessionController`](crate::session::SessionController).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Perceptual delay applied after every response or failure.
    pub reply_delay: Duration,

    /// Bot message appended when the session starts, if any.
    pub greeting: Option<String>,
}

impl SessionConfig {
    /// Creates a new SessionConfig with default values.
    ///
    /// Defaults:
    /// - Reply delay: 1 second
    /// - Greeting: [`DEFAULT_GREETING`]
    pub fn new() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            greeting: Some(DEFAULT_GREETING.to_string()),
        }
    }

    /// Sets the perceptual reply delay.
    pub fn with_reply_delay(mut self, reply_delay: Duration) -> Self {
        self.reply_delay = reply_delay;
        self
    }

    /// Sets the greeting.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    /// Starts the session without a greeting.
    pub fn without_greeting(mut self) -> Self {
        self.greeting = None;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.reply_delay, Duration::from_secs(1));
        assert_eq!(config.greeting.as_deref(), Some(DEFAULT_GREETING));
    }

    #[test]
    fn config_builder_pattern() {
        let config = SessionConfig::new()
            .with_reply_delay(Duration::from_millis(250))
            .with_greeting("hello");
        assert_eq!(config.reply_delay, Duration::from_millis(250));
        assert_eq!(config.greeting.as_deref(), Some("hello"));

        let config = config.without_greeting();
        assert!(config.greeting.is_none());
    }
}
