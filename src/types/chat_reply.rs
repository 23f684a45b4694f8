use serde::{Deserialize, Deserializer, Serialize};

use crate::types::Resource;

/// Successful response body of `POST /api/chat`.
///
/// Every field except `message` is optional on the wire. Absent or `null`
/// values take their defaults: no crisis, no resources, no topics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// The text of the bot's reply.
    pub message: String,

    /// Whether the backend judged the user's text to indicate a crisis.
    #[serde(default, deserialize_with = "null_as_default")]
    pub crisis_detected: bool,

    /// Support resources related to the user's text, in display order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub resources: Vec<Resource>,

    /// Topic labels the backend attached to the user's text.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub detected_topics: Vec<String>,
}

impl ChatReply {
    /// Create a plain reply with no crisis flag and no resources.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Set the crisis flag.
    pub fn with_crisis_detected(mut self, crisis_detected: bool) -> Self {
        self.crisis_detected = crisis_detected;
        self
    }

    /// Set the resources.
    pub fn with_resources(mut self, resources: Vec<Resource>) -> Self {
        self.resources = resources;
        self
    }

    /// Set the detected topics.
    pub fn with_detected_topics(mut self, topics: Vec<String>) -> Self {
        self.detected_topics = topics;
        self
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
