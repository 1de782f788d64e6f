//! Mascot Widget Engine
//!
//! One parameterized engine serves both mascot variants: a
//! [`PersonaConfig`] selects the greeting, the remark stage, the endpoint,
//! and the reply-derivation strategy, and everything else is shared.
//!
//! The widget owns a [`StageSequencer`], a [`Typewriter`], a
//! [`ChatController`] and a [`ScrollSync`]; a single driver task calls
//! [`MascotWidget::tick`] on an interval and [`MascotWidget::send_message`]
//! on user input. Surfaces observe through [`MascotWidget::subscribe`] and
//! the read accessors; they never mutate engine state directly.
//!
//! # Typewriter gating
//!
//! The typewriter activates only once the reveal reaches
//! [`Stage::BubbleShown`]. The therapy persona additionally suppresses it
//! once the session has started: the speech bubble switches from greeting
//! to chat and the greeting never resumes (`has_started` latches). The
//! tutor keeps its greeting alongside the chat.
//!
//! # Teardown
//!
//! All timers are plain countdown state observed by ticks, so dropping the
//! widget (or calling [`MascotWidget::teardown`] first for an explicit
//! release) guarantees nothing fires after the widget is gone. A remote
//! call in flight at teardown is dropped with the driver task; its
//! completion can never touch freed state.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::backend::CoachBackend;
use crate::controller::{ChatController, SendOutcome};
use crate::events::{EventBus, WidgetEvent};
use crate::messages::ChatMessage;
use crate::persona::{Persona, PersonaConfig};
use crate::reveal::{Stage, StageSequencer, Typewriter};
use crate::scroll::ScrollSync;
use crate::session::ChatSession;

/// Default viewport height until the surface reports a real one
const DEFAULT_VIEWPORT_ROWS: usize = 12;

/// The staged conversational mascot engine
pub struct MascotWidget {
    /// Persona parameterization
    config: PersonaConfig,
    /// Timed reveal state machine
    sequencer: StageSequencer,
    /// Greeting reveal
    typewriter: Typewriter,
    /// Message log and send protocol
    controller: ChatController,
    /// Bottom-pinned viewport state
    scroll: ScrollSync,
    /// Event bus surfaces subscribe to
    events: EventBus,
    /// Set by [`MascotWidget::teardown`]; ticks become no-ops
    torn_down: bool,
}

impl MascotWidget {
    /// Create a widget; the reveal sequence starts immediately
    #[must_use]
    pub fn new(config: PersonaConfig, backend: Arc<dyn CoachBackend>) -> Self {
        let events = EventBus::default();
        let sequencer = StageSequencer::new(config.schedule, config.remark.is_some());
        let typewriter = Typewriter::new(config.greeting.clone(), config.typewriter_interval);
        let controller = ChatController::new(
            backend,
            config.persona,
            config.session_id.clone(),
            events.clone(),
        );
        Self {
            config,
            sequencer,
            typewriter,
            controller,
            scroll: ScrollSync::new(DEFAULT_VIEWPORT_ROWS),
            events,
            torn_down: false,
        }
    }

    /// Subscribe to engine events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.events.subscribe()
    }

    /// Persona this widget runs
    #[must_use]
    pub fn persona(&self) -> Persona {
        self.config.persona
    }

    /// Persona configuration
    #[must_use]
    pub fn config(&self) -> &PersonaConfig {
        &self.config
    }

    /// Current reveal stage
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.sequencer.stage()
    }

    /// Currently displayed greeting prefix
    #[must_use]
    pub fn greeting_text(&self) -> &str {
        self.typewriter.shown()
    }

    /// Whether the full greeting is displayed
    #[must_use]
    pub fn greeting_complete(&self) -> bool {
        self.typewriter.is_complete()
    }

    /// Session state (read-only; mutation goes through the engine)
    #[must_use]
    pub fn session(&self) -> &ChatSession {
        self.controller.session()
    }

    /// Message log, oldest first
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        self.controller.session().messages()
    }

    /// Whether a remote call is in flight
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.controller.session().pending()
    }

    /// Current scroll offset of the message viewport
    #[must_use]
    pub fn scroll_offset(&self) -> usize {
        self.scroll.offset()
    }

    /// Report the surface's viewport height
    pub fn set_viewport_rows(&mut self, rows: usize) {
        let content = self.content_rows();
        self.scroll.set_viewport(rows, content);
    }

    /// Replace the draft text
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.controller.set_draft(draft);
    }

    /// Advance timers: reveal stages, typewriter, scroll pinning.
    ///
    /// Returns `true` when anything visible changed.
    pub fn tick(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        let mut changed = false;

        if let Some(stage) = self.sequencer.tick() {
            self.events.emit(WidgetEvent::StageChanged { stage });
            changed = true;
        }

        self.gate_typewriter();

        if self.typewriter.tick() {
            self.events.emit(WidgetEvent::GreetingUpdated {
                text: self.typewriter.shown().to_string(),
            });
            changed = true;
        }

        if changed {
            let content = self.content_rows();
            self.scroll.sync(content);
        }
        changed
    }

    /// Send a message through the controller and re-pin the viewport
    pub async fn send_message(&mut self, draft: &str) -> SendOutcome {
        let outcome = self.controller.send_message(draft).await;
        if outcome != SendOutcome::Rejected {
            let content = self.content_rows();
            self.scroll.sync(content);
        }
        outcome
    }

    /// Release every pending timer explicitly.
    ///
    /// Dropping the widget has the same effect; this exists so drivers can
    /// halt the reveal before the widget itself goes away.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.sequencer.cancel();
        self.typewriter.deactivate();
    }

    /// Activate or suppress the typewriter per stage and persona.
    fn gate_typewriter(&mut self) {
        let greeting_wanted = self.sequencer.stage() == Stage::BubbleShown
            && (self.config.persona == Persona::Tutor || !self.session().has_started());

        if greeting_wanted && !self.typewriter.is_active() {
            self.typewriter.activate();
        } else if !greeting_wanted && self.typewriter.is_active() {
            self.typewriter.deactivate();
        }
    }

    /// Rows of content the viewport scrolls over: one per message, plus the
    /// greeting line while it is visible.
    fn content_rows(&self) -> usize {
        let greeting_rows = usize::from(!self.typewriter.shown().is_empty());
        self.session().message_count() + greeting_rows
    }
}
