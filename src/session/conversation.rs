use serde::{Deserialize, Serialize};

use crate::resources;
use crate::types::{ChatMessage, ChatReply, Mood, ResourceGroup, Sender};

/// The mutable state behind a session.
///
/// Only the controller touches this, always under its lock.
#[derive(Debug)]
pub(crate) struct Conversation {
    messages: Vec<ChatMessage>,
    next_id: u64,
    pending: bool,
    crisis_alert_visible: bool,
    resource_groups: Vec<ResourceGroup>,
    last_topics: Vec<String>,
    mood: Option<Mood>,
    disposed: bool,
}

impl Conversation {
    pub(crate) fn new(greeting: Option<&str>) -> Self {
        let mut conversation = Self {
            messages: Vec::new(),
            next_id: 1,
            pending: false,
            crisis_alert_visible: false,
            resource_groups: resources::default_groups(),
            last_topics: Vec::new(),
            mood: None,
            disposed: false,
        };
        if let Some(greeting) = greeting {
            conversation.append(Sender::Bot, greeting);
        }
        conversation
    }

    /// Append a message, assigning the next id.
    pub(crate) fn append(&mut self, sender: Sender, text: &str) -> &ChatMessage {
        let message = ChatMessage::new(self.next_id, text, sender);
        self.next_id += 1;
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Fold the reply's crisis flag and resources into the state.
    ///
    /// Returns true if the backend raised the crisis alert.
    pub(crate) fn absorb_reply(&mut self, reply: &ChatReply) -> bool {
        if !reply.resources.is_empty() {
            self.resource_groups = resources::group(reply.resources.iter().cloned());
        }
        self.last_topics = reply.detected_topics.clone();
        if reply.crisis_detected {
            self.crisis_alert_visible = true;
        }
        reply.crisis_detected
    }

    pub(crate) fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending
    }

    pub(crate) fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    pub(crate) fn crisis_alert_visible(&self) -> bool {
        self.crisis_alert_visible
    }

    pub(crate) fn raise_crisis_alert(&mut self) {
        self.crisis_alert_visible = true;
    }

    pub(crate) fn dismiss_crisis_alert(&mut self) {
        self.crisis_alert_visible = false;
    }

    pub(crate) fn resource_groups(&self) -> &[ResourceGroup] {
        &self.resource_groups
    }

    pub(crate) fn last_topics(&self) -> &[String] {
        &self.last_topics
    }

    pub(crate) fn mood(&self) -> Option<Mood> {
        self.mood
    }

    pub(crate) fn set_mood(&mut self, mood: Option<Mood>) {
        self.mood = mood;
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub(crate) fn dispose(&mut self) {
        self.disposed = true;
    }

    pub(crate) fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            messages: self.messages.clone(),
            pending: self.pending,
            crisis_alert_visible: self.crisis_alert_visible,
            resource_groups: self.resource_groups.clone(),
            last_topics: self.last_topics.clone(),
            mood: self.mood,
        }
    }
}

/// An owned, point-in-time copy of a session's visible state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    /// Messages in insertion order.
    pub messages: Vec<ChatMessage>,
    /// True while a reply is outstanding.
    pub pending: bool,
    /// True until the user dismisses the crisis alert.
    pub crisis_alert_visible: bool,
    /// Support links currently on display.
    pub resource_groups: Vec<ResourceGroup>,
    /// Topics the backend attached to the latest reply.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub last_topics: Vec<String>,
    /// The user's most recent mood check-in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}
