//! Widget Events
//!
//! Events emitted by the engine for embedding contexts to observe. Rather
//! than handing the controller per-collaborator callbacks, any number of
//! collaborators subscribe to one broadcast channel, and the controller
//! does not know who is listening.
//!
//! Emission is fire-and-forget: a send with no subscribers, or to a lagging
//! subscriber, is silently dropped. Events describe state that already
//! changed; subscribers must never be able to veto a mutation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::backend::StructuredReply;
use crate::messages::ChatMessage;
use crate::reveal::Stage;

/// Default broadcast capacity; a slow subscriber past this lags, it does
/// not block the engine. Sized so a full reveal (one event per greeting
/// character) fits without lagging a surface that drains between ticks.
const DEFAULT_CAPACITY: usize = 256;

/// Events from the widget engine to embedding contexts
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum WidgetEvent {
    /// The reveal sequence entered a new stage
    StageChanged {
        /// The stage just entered
        stage: Stage,
    },
    /// The typewriter revealed more of the greeting
    GreetingUpdated {
        /// Currently displayed prefix
        text: String,
    },
    /// A message was appended to the session log
    MessageAppended {
        /// The appended message
        message: ChatMessage,
    },
    /// The pending flag flipped (true at dispatch, false at completion)
    ProcessingChanged {
        /// Whether a remote call is now in flight
        processing: bool,
    },
    /// The remote endpoint answered; full structured payload attached
    AgentResponse {
        /// The decoded payload
        payload: StructuredReply,
    },
}

/// Broadcast-backed event bus owned by one widget instance
#[derive(Clone, Debug)]
pub struct EventBus {
    /// Underlying broadcast sender
    tx: broadcast::Sender<WidgetEvent>,
}

impl EventBus {
    /// Create a bus with the given capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all subsequent events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to every current subscriber (fire-and-forget)
    pub fn emit(&self, event: WidgetEvent) {
        // Err means no receivers; that is fine.
        let _ = self.tx.send(event);
    }

    /// Number of live subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_without_subscribers_is_noop() {
        let bus = EventBus::default();
        bus.emit(WidgetEvent::ProcessingChanged { processing: true });
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_multiple_subscribers_see_every_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(WidgetEvent::StageChanged {
            stage: Stage::MascotShown,
        });

        for rx in [&mut rx1, &mut rx2] {
            match rx.recv().await.unwrap() {
                WidgetEvent::StageChanged { stage } => assert_eq!(stage, Stage::MascotShown),
                other => panic!("unexpected event {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_subscription_starts_at_subscribe_time() {
        let bus = EventBus::default();
        bus.emit(WidgetEvent::ProcessingChanged { processing: true });

        let mut rx = bus.subscribe();
        bus.emit(WidgetEvent::ProcessingChanged { processing: false });

        match rx.recv().await.unwrap() {
            WidgetEvent::ProcessingChanged { processing } => assert!(!processing),
            other => panic!("unexpected event {other:?}"),
        }
    }
}
