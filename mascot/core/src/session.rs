//! Session State
//!
//! Plain state for one mascot chat session, with explicit mutation methods.
//! This is the framework-agnostic "view model": the widget mutates it, the
//! presentation layer only reads it.
//!
//! # Invariants
//!
//! - The message log is append-only; nothing is mutated or removed after
//!   insertion.
//! - `pending` is true for the duration of exactly one in-flight remote
//!   call.
//! - `has_started` flips to true once and never reverts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::messages::ChatMessage;

/// State for one chat session, exclusively owned by its widget
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatSession {
    /// Instance identity, for logging and diagnostics
    id: Uuid,
    /// Ordered conversation log
    messages: Vec<ChatMessage>,
    /// Whether a remote call is in flight
    pending: bool,
    /// Text the user is composing
    draft: String,
    /// Whether the session has ever dispatched a message
    has_started: bool,
}

impl ChatSession {
    /// Create an empty session
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: Vec::new(),
            pending: false,
            draft: String::new(),
            has_started: false,
        }
    }

    /// Instance identity
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// All messages, oldest first
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// The most recent message, if any
    #[must_use]
    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Append a message (append-only: there is no removal)
    pub fn push(&mut self, message: ChatMessage) {
        tracing::trace!(session = %self.id, role = ?message.role, "message appended");
        self.messages.push(message);
    }

    /// Whether a remote call is in flight
    #[must_use]
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Set the pending flag
    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    /// Current draft text
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft text
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// Take the draft, leaving it empty
    pub fn take_draft(&mut self) -> String {
        std::mem::take(&mut self.draft)
    }

    /// Whether the session has ever dispatched a message
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.has_started
    }

    /// Latch the session as started; never reverts
    pub fn mark_started(&mut self) {
        self.has_started = true;
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
