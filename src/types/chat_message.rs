use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::Sender;

/// A single entry in the conversation.
///
/// Messages are immutable once created; the session controller is the only
/// place that constructs them and it hands out shared references or clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: u64,
    text: String,
    sender: Sender,
    #[serde(with = "crate::utils::time")]
    timestamp: OffsetDateTime,
}

impl ChatMessage {
    /// Create a message stamped with the current UTC time.
    pub fn new(id: u64, text: impl Into<String>, sender: Sender) -> Self {
        Self::with_timestamp(id, text, sender, OffsetDateTime::now_utc())
    }

    /// Create a message with an explicit timestamp.
    pub fn with_timestamp(
        id: u64,
        text: impl Into<String>,
        sender: Sender,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            sender,
            timestamp,
        }
    }

    /// The conversation-unique, strictly increasing identifier.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The message body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Who wrote the message.
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// When the message was appended.
    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// True when the user authored this message.
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    /// True when the bot authored this message.
    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn accessors() {
        let message = ChatMessage::new(7, "hello", Sender::User);
        assert_eq!(message.id(), 7);
        assert_eq!(message.text(), "hello");
        assert_eq!(message.sender(), Sender::User);
        assert!(message.is_user());
        assert!(!message.is_bot());
    }

    #[test]
    fn serializes_timestamp_as_rfc3339() {
        let message = ChatMessage::with_timestamp(
            1,
            "hi",
            Sender::Bot,
            datetime!(2024-03-01 12:30:00 UTC),
        );
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["sender"], "bot");
        assert_eq!(json["timestamp"], "2024-03-01T12:30:00Z");

        let parsed: ChatMessage = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, message);
    }
}
