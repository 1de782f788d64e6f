//! Chat Messages
//!
//! Message types for the mascot's conversation log. The log is append-only:
//! once a message is pushed into a session it is never mutated or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::StructuredReply;

/// Message identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Generate a new unique message ID
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        Self(format!("msg_{id}"))
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

/// Who sent a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    /// User input
    User,
    /// The mascot (SuperBear)
    Assistant,
}

/// A message in the conversation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message ID
    pub id: MessageId,
    /// Who sent this message
    pub role: MessageRole,
    /// Display text
    pub content: String,
    /// Full structured payload the display text was derived from
    /// (assistant messages only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<StructuredReply>,
    /// When the message was created
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role: MessageRole::User,
            content: content.into(),
            payload: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role: MessageRole::Assistant,
            content: content.into(),
            payload: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach the structured payload the content was derived from
    #[must_use]
    pub fn with_payload(mut self, payload: StructuredReply) -> Self {
        self.payload = Some(payload);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_id_unique() {
        let id1 = MessageId::new();
        let id2 = MessageId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_user_message_has_no_payload() {
        let msg = ChatMessage::user("hello");
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content, "hello");
        assert!(msg.payload.is_none());
    }

    #[test]
    fn test_assistant_message_carries_payload() {
        let reply = StructuredReply {
            encouragement: Some("You got this".to_string()),
            ..StructuredReply::default()
        };
        let msg = ChatMessage::assistant("You got this").with_payload(reply.clone());
        assert_eq!(msg.role, MessageRole::Assistant);
        assert_eq!(msg.payload, Some(reply));
    }
}
