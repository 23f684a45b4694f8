//! The session controller.
//!
//! A submission moves through `Idle -> Submitting -> {Delivered, Failed} ->
//! Idle`. The outbound request and the perceptual delay run on a spawned task
//! that is bound to the session's lifetime: once the session is disposed the
//! task stops at its next suspension point and re-checks the disposed tag
//! under the lock before every write.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures::FutureExt;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::client::ChatClient;
use crate::crisis;
use crate::error::{Error, Result};
use crate::observability::{
    SESSION_APOLOGIES, SESSION_CANCELLED, SESSION_CRISIS_ALERTS, SESSION_REJECTED,
    SESSION_REPLIES, SESSION_SUBMISSIONS,
};
use crate::session::config::{APOLOGY_TEXT, SessionConfig};
use crate::session::conversation::{Conversation, ConversationSnapshot};
use crate::types::{ChatMessage, ChatRequest, Mood, ResourceGroup, Sender};

/// How a submission ended.
#[derive(Debug, Clone)]
pub enum ReplyOutcome {
    /// The backend's reply was appended.
    Delivered(ChatMessage),
    /// The apology was appended in place of a reply.
    Failed {
        /// The apology message as appended.
        apology: ChatMessage,
        /// Why the backend could not be used.
        error: Error,
    },
    /// The session was disposed before the reply could be appended.
    Cancelled,
}

impl ReplyOutcome {
    /// The message this submission appended, if any.
    pub fn message(&self) -> Option<&ChatMessage> {
        match self {
            ReplyOutcome::Delivered(message) => Some(message),
            ReplyOutcome::Failed { apology, .. } => Some(apology),
            ReplyOutcome::Cancelled => None,
        }
    }

    /// True when the backend's reply was appended.
    pub fn is_delivered(&self) -> bool {
        matches!(self, ReplyOutcome::Delivered(_))
    }

    /// True when the apology was appended.
    pub fn is_failed(&self) -> bool {
        matches!(self, ReplyOutcome::Failed { .. })
    }

    /// True when nothing was appended because the session was disposed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ReplyOutcome::Cancelled)
    }
}

/// Resolves once an accepted submission has appended its bot message.
///
/// Dropping a `PendingReply` does not cancel the submission; the reply is
/// still appended to the conversation.
#[derive(Debug)]
pub struct PendingReply {
    handle: JoinHandle<ReplyOutcome>,
}

impl Future for PendingReply {
    type Output = ReplyOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.handle.poll_unpin(cx).map(|joined| match joined {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!("reply task did not complete: {err}");
                ReplyOutcome::Cancelled
            }
        })
    }
}

struct Shared {
    state: Mutex<Conversation>,
    client: Arc<dyn ChatClient>,
    config: SessionConfig,
    lifetime: CancellationToken,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Conversation> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cancelled(&self) -> ReplyOutcome {
        SESSION_CANCELLED.click();
        tracing::debug!("session disposed with a reply outstanding; dropping it");
        ReplyOutcome::Cancelled
    }

    async fn deliver(self: Arc<Self>, request: ChatRequest) -> ReplyOutcome {
        let result = tokio::select! {
            biased;
            _ = self.lifetime.cancelled() => return self.cancelled(),
            result = AssertUnwindSafe(self.client.chat(request)).catch_unwind() => {
                result.unwrap_or_else(|_| Err(Error::http_client("chat client panicked", None)))
            }
        };

        let reply_text = match result {
            Ok(reply) => {
                let mut state = self.lock();
                if state.is_disposed() {
                    return self.cancelled();
                }
                if state.absorb_reply(&reply) {
                    SESSION_CRISIS_ALERTS.click();
                    tracing::warn!(source = "backend", "crisis alert raised");
                }
                Ok(reply.message)
            }
            Err(err) => {
                tracing::error!("chat request failed: {err}");
                Err(err)
            }
        };

        tokio::select! {
            biased;
            _ = self.lifetime.cancelled() => return self.cancelled(),
            _ = tokio::time::sleep(self.config.reply_delay) => {}
        }

        let mut state = self.lock();
        if state.is_disposed() {
            return self.cancelled();
        }
        state.set_pending(false);
        match reply_text {
            Ok(text) => {
                SESSION_REPLIES.click();
                let message = state.append(Sender::Bot, &text).clone();
                tracing::info!(id = message.id(), "reply delivered");
                ReplyOutcome::Delivered(message)
            }
            Err(error) => {
                SESSION_APOLOGIES.click();
                let apology = state.append(Sender::Bot, APOLOGY_TEXT).clone();
                tracing::info!(id = apology.id(), "apology delivered");
                ReplyOutcome::Failed { apology, error }
            }
        }
    }
}

/// Owns one conversation and drives its submissions.
///
/// `submit` must be called from within a tokio runtime; the request and the
/// perceptual delay run on a spawned task. Dropping the controller disposes
/// it.
pub struct SessionController {
    shared: Arc<Shared>,
}

impl SessionController {
    /// Creates a session that talks to `client`.
    pub fn new(client: Arc<dyn ChatClient>, config: SessionConfig) -> Self {
        let state = Conversation::new(config.greeting.as_deref());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                client,
                config,
                lifetime: CancellationToken::new(),
            }),
        }
    }

    /// Submits user text.
    ///
    /// Returns `Ok(None)` without touching the conversation when the trimmed
    /// text is empty. Otherwise the user message is appended, the local crisis
    /// scan is applied, and the request is started; the returned
    /// [`PendingReply`] resolves once the bot message has been appended.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Busy`] while a previous submission is pending and
    /// [`Error::Disposed`] after [`dispose`](Self::dispose).
    pub fn submit(&self, raw_text: &str) -> Result<Option<PendingReply>> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let mut state = self.shared.lock();
        if state.is_disposed() {
            return Err(Error::disposed("cannot submit to a disposed session"));
        }
        if state.is_pending() {
            SESSION_REJECTED.click();
            tracing::debug!("submission rejected while a reply is pending");
            return Err(Error::busy("a reply is still pending"));
        }

        SESSION_SUBMISSIONS.click();
        let id = state.append(Sender::User, text).id();
        tracing::info!(id, len = text.len(), "submission accepted");
        if crisis::scan(text) {
            SESSION_CRISIS_ALERTS.click();
            tracing::warn!(source = "local", id, "crisis alert raised");
            state.raise_crisis_alert();
        }
        state.set_pending(true);
        drop(state);

        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(shared.deliver(ChatRequest::new(text)));
        Ok(Some(PendingReply { handle }))
    }

    /// Hides the crisis alert. Messages and the pending flag are untouched.
    pub fn dismiss_crisis_alert(&self) {
        let mut state = self.shared.lock();
        if !state.is_disposed() {
            state.dismiss_crisis_alert();
        }
    }

    /// Tears the session down. Outstanding submissions append nothing.
    pub fn dispose(&self) {
        let mut state = self.shared.lock();
        if !state.is_disposed() {
            state.dispose();
            tracing::debug!("session disposed");
        }
        drop(state);
        self.shared.lifetime.cancel();
    }

    /// True once [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.shared.lock().is_disposed()
    }

    /// Copies of all messages in insertion order.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.shared.lock().messages().to_vec()
    }

    /// The number of messages in the conversation.
    pub fn message_count(&self) -> usize {
        self.shared.lock().messages().len()
    }

    /// True while a submission awaits its bot message.
    pub fn is_pending(&self) -> bool {
        self.shared.lock().is_pending()
    }

    /// True from the first crisis signal until the user dismisses the alert.
    pub fn crisis_alert_visible(&self) -> bool {
        self.shared.lock().crisis_alert_visible()
    }

    /// Support links currently on display.
    pub fn resource_groups(&self) -> Vec<ResourceGroup> {
        self.shared.lock().resource_groups().to_vec()
    }

    /// Topics the backend attached to the most recent reply.
    pub fn last_topics(&self) -> Vec<String> {
        self.shared.lock().last_topics().to_vec()
    }

    /// Records the user's mood check-in. It is not sent to the backend.
    pub fn set_mood(&self, mood: Option<Mood>) {
        let mut state = self.shared.lock();
        if state.is_disposed() {
            return;
        }
        state.set_mood(mood);
        if let Some(mood) = mood {
            tracing::info!(mood = mood.label(), "mood selected");
        }
    }

    /// The user's most recent mood check-in.
    pub fn mood(&self) -> Option<Mood> {
        self.shared.lock().mood()
    }

    /// An owned copy of the visible state.
    pub fn snapshot(&self) -> ConversationSnapshot {
        self.shared.lock().snapshot()
    }

    /// The configuration the session was created with.
    pub fn config(&self) -> &SessionConfig {
        &self.shared.config
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.dispose();
    }
}
