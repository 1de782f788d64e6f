//! Chat Session Controller
//!
//! Owns the send-message protocol against the remote coaching endpoint:
//! precondition checks, optimistic message state, the request/response
//! lifecycle, and failure conversion.
//!
//! # Send protocol
//!
//! 1. Reject (no state change) when the trimmed draft is empty or a call is
//!    already pending.
//! 2. Clear the draft, append the `User` message, set `pending`, latch
//!    `has_started`, emit `ProcessingChanged(true)`.
//! 3. Issue exactly one request to the persona's endpoint with the static
//!    session id and static profile.
//! 4. Append exactly one `Assistant` message: the persona-derived text on
//!    success, the fixed connection apology on any failure.
//! 5. Clear `pending` and emit `ProcessingChanged(false)`.
//!
//! Step 5 sits after the match on the call result, so it holds on every
//! exit path. Failures never escape `send_message`; callers only see the
//! [`SendOutcome`].
//!
//! # At most one in-flight call
//!
//! The pending check rejects a second send while one is in flight, and the
//! flag is set before the first await. Re-entry within the same scheduling
//! turn is additionally impossible because `send_message` takes
//! `&mut self`: a session can never race two requests, so replies land in
//! the order messages were sent.

use std::sync::Arc;

use crate::backend::{CoachBackend, CoachRequest, UserProfile};
use crate::events::{EventBus, WidgetEvent};
use crate::messages::ChatMessage;
use crate::persona::{Persona, CONNECTION_APOLOGY};
use crate::session::ChatSession;

/// Result of a [`ChatController::send_message`] call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Precondition failed; nothing changed
    Rejected,
    /// The endpoint answered and an assistant message was appended
    Answered,
    /// The call failed; the apology message was appended
    Failed,
}

/// Controller for one chat session
pub struct ChatController {
    /// Session state this controller mutates
    session: ChatSession,
    /// Remote endpoint
    backend: Arc<dyn CoachBackend>,
    /// Reply-derivation strategy and endpoint selection
    persona: Persona,
    /// Static session identifier sent with every request
    session_id: String,
    /// Static profile sent with every request
    profile: UserProfile,
    /// Event bus shared with the owning widget
    events: EventBus,
}

impl ChatController {
    /// Create a controller with a fresh session
    #[must_use]
    pub fn new(
        backend: Arc<dyn CoachBackend>,
        persona: Persona,
        session_id: impl Into<String>,
        events: EventBus,
    ) -> Self {
        Self {
            session: ChatSession::new(),
            backend,
            persona,
            session_id: session_id.into(),
            profile: UserProfile::default(),
            events,
        }
    }

    /// Read access to the session state
    #[must_use]
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Replace the draft text (surfaces call this as the user types)
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.session.set_draft(draft);
    }

    /// Send a message through the remote endpoint.
    ///
    /// Never returns an error and never panics on backend failure; every
    /// outcome is reported through the session log, the event bus, and the
    /// returned [`SendOutcome`].
    pub async fn send_message(&mut self, draft: &str) -> SendOutcome {
        let text = draft.trim();
        if text.is_empty() || self.session.pending() {
            return SendOutcome::Rejected;
        }

        self.session.take_draft();
        let user_message = ChatMessage::user(text);
        self.session.push(user_message.clone());
        self.events.emit(WidgetEvent::MessageAppended {
            message: user_message,
        });

        self.session.set_pending(true);
        self.session.mark_started();
        self.events
            .emit(WidgetEvent::ProcessingChanged { processing: true });

        let request = CoachRequest {
            message: text.to_string(),
            session_id: self.session_id.clone(),
            user_profile: self.profile.clone(),
        };

        tracing::debug!(
            session = %self.session.id(),
            backend = self.backend.name(),
            endpoint = self.persona.endpoint_path(),
            "dispatching message"
        );

        let outcome = match self.backend.send(&request).await {
            Ok(reply) => {
                let content = self.persona.derive_reply_text(&reply);
                let assistant = ChatMessage::assistant(content).with_payload(reply.clone());
                self.session.push(assistant.clone());
                self.events
                    .emit(WidgetEvent::MessageAppended { message: assistant });
                self.events
                    .emit(WidgetEvent::AgentResponse { payload: reply });
                SendOutcome::Answered
            }
            Err(error) => {
                tracing::warn!(
                    session = %self.session.id(),
                    error = %error,
                    "coaching call failed"
                );
                let apology = ChatMessage::assistant(CONNECTION_APOLOGY);
                self.session.push(apology.clone());
                self.events
                    .emit(WidgetEvent::MessageAppended { message: apology });
                SendOutcome::Failed
            }
        };

        // Holds on every path above; the input affordance must come back.
        self.session.set_pending(false);
        self.events
            .emit(WidgetEvent::ProcessingChanged { processing: false });

        outcome
    }
}
