//! Integration tests for the mascot widget engine
//!
//! These exercise the full widget - reveal sequencing, greeting typewriter,
//! the send protocol, and event emission - against a scripted backend, the
//! way a real surface drives it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use mascot_core::{
    CoachBackend, CoachRequest, MascotWidget, MessageRole, Persona, PersonaConfig, SendOutcome,
    Stage, StageSchedule, StructuredReply, WidgetEvent, CONNECTION_APOLOGY,
};

/// Backend that replays a scripted queue of results and records requests
struct ScriptedBackend {
    replies: Mutex<VecDeque<anyhow::Result<StructuredReply>>>,
    requests: Mutex<Vec<CoachRequest>>,
}

impl ScriptedBackend {
    fn new(replies: Vec<anyhow::Result<StructuredReply>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<CoachRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CoachBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn health_check(&self) -> bool {
        true
    }

    async fn send(&self, request: &CoachRequest) -> anyhow::Result<StructuredReply> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("script exhausted")))
    }
}

fn fast_config(persona: Persona) -> PersonaConfig {
    PersonaConfig::for_persona(persona)
        .with_schedule(StageSchedule::uniform(Duration::from_millis(5)))
        .with_typewriter_interval(Duration::from_millis(1))
}

/// Tick until the reveal and greeting are both complete
async fn run_reveal(widget: &mut MascotWidget) {
    for _ in 0..5_000 {
        widget.tick();
        if widget.stage() == Stage::BubbleShown && widget.greeting_complete() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("reveal did not complete");
}

#[tokio::test]
async fn reveal_visits_every_stage_in_order() {
    let backend = ScriptedBackend::new(vec![]);
    let config = fast_config(Persona::Tutor).with_greeting("Hi!");
    let mut widget = MascotWidget::new(config, backend);
    let mut events = widget.subscribe();

    run_reveal(&mut widget).await;

    let mut stages = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let WidgetEvent::StageChanged { stage } = event {
            stages.push(stage);
        }
    }
    assert_eq!(
        stages,
        vec![Stage::MascotShown, Stage::RemarkShown, Stage::BubbleShown]
    );
}

#[tokio::test]
async fn therapy_reveal_skips_remark() {
    let backend = ScriptedBackend::new(vec![]);
    let config = fast_config(Persona::Therapy).with_greeting("Hey.");
    let mut widget = MascotWidget::new(config, backend);
    let mut events = widget.subscribe();

    run_reveal(&mut widget).await;

    let mut stages = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let WidgetEvent::StageChanged { stage } = event {
            stages.push(stage);
        }
    }
    assert_eq!(stages, vec![Stage::MascotShown, Stage::BubbleShown]);
}

#[tokio::test]
async fn greeting_states_are_strictly_growing_prefixes() {
    let backend = ScriptedBackend::new(vec![]);
    let config = fast_config(Persona::Tutor).with_greeting("Hello trader!");
    let mut widget = MascotWidget::new(config, backend);
    let mut events = widget.subscribe();

    run_reveal(&mut widget).await;

    let greeting = "Hello trader!";
    let mut updates = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let WidgetEvent::GreetingUpdated { text } = event {
            updates.push(text);
        }
    }
    // One update per character; the initial empty state is implicit.
    assert_eq!(updates.len(), greeting.chars().count());
    let mut previous = 0;
    for text in &updates {
        assert!(greeting.starts_with(text.as_str()));
        assert!(text.chars().count() > previous);
        previous = text.chars().count();
    }
    assert_eq!(updates.last().unwrap(), greeting);
}

#[tokio::test]
async fn sold_too_early_scenario() {
    let backend = ScriptedBackend::new(vec![Ok(StructuredReply {
        acknowledgment: Some("I hear you".to_string()),
        ..StructuredReply::default()
    })]);
    let mut widget = MascotWidget::new(fast_config(Persona::Therapy), backend.clone());
    run_reveal(&mut widget).await;

    let outcome = widget.send_message("I sold too early").await;
    assert_eq!(outcome, SendOutcome::Answered);

    let messages = widget.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, MessageRole::User);
    assert_eq!(messages[0].content, "I sold too early");
    assert_eq!(messages[1].role, MessageRole::Assistant);
    assert_eq!(messages[1].content, "I hear you");
    assert_eq!(
        messages[1]
            .payload
            .as_ref()
            .unwrap()
            .acknowledgment
            .as_deref(),
        Some("I hear you")
    );
    assert!(!widget.is_pending());

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].session_id, "therapy-default");
}

#[tokio::test]
async fn backend_failure_produces_one_apology() {
    let backend = ScriptedBackend::new(vec![Err(anyhow::anyhow!("connection refused"))]);
    let mut widget = MascotWidget::new(fast_config(Persona::Tutor), backend);
    run_reveal(&mut widget).await;

    let outcome = widget.send_message("explain candles").await;
    assert_eq!(outcome, SendOutcome::Failed);

    let messages = widget.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].content, CONNECTION_APOLOGY);
    assert!(!widget.is_pending());
}

#[tokio::test]
async fn rejected_sends_change_nothing() {
    let backend = ScriptedBackend::new(vec![]);
    let mut widget = MascotWidget::new(fast_config(Persona::Tutor), backend.clone());
    run_reveal(&mut widget).await;

    assert_eq!(widget.send_message("").await, SendOutcome::Rejected);
    assert_eq!(widget.send_message("   ").await, SendOutcome::Rejected);
    assert!(widget.messages().is_empty());
    assert!(!widget.session().has_started());
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn every_completed_send_adds_exactly_one_exchange() {
    let backend = ScriptedBackend::new(vec![
        Ok(StructuredReply {
            teaching_explanation: Some("Candles show open, high, low, close.".to_string()),
            ..StructuredReply::default()
        }),
        Err(anyhow::anyhow!("boom")),
    ]);
    let mut widget = MascotWidget::new(fast_config(Persona::Tutor), backend);
    run_reveal(&mut widget).await;

    for draft in ["first question", "second question"] {
        let user_before = count_role(&widget, MessageRole::User);
        let assistant_before = count_role(&widget, MessageRole::Assistant);

        widget.send_message(draft).await;

        assert_eq!(count_role(&widget, MessageRole::User), user_before + 1);
        assert_eq!(
            count_role(&widget, MessageRole::Assistant),
            assistant_before + 1
        );
        assert!(!widget.is_pending());
    }
}

#[tokio::test]
async fn therapy_greeting_suppressed_once_started() {
    let backend = ScriptedBackend::new(vec![Ok(StructuredReply::default())]);
    let mut widget = MascotWidget::new(fast_config(Persona::Therapy), backend);
    run_reveal(&mut widget).await;
    let full_greeting = widget.config().greeting.clone();
    assert_eq!(widget.greeting_text(), full_greeting);

    widget.send_message("feeling down").await;
    let mut events = widget.subscribe();
    for _ in 0..20 {
        widget.tick();
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    // No further greeting activity after the session starts.
    while let Ok(event) = events.try_recv() {
        assert!(!matches!(event, WidgetEvent::GreetingUpdated { .. }));
    }
}

#[tokio::test]
async fn processing_events_bracket_the_call() {
    let backend = ScriptedBackend::new(vec![Ok(StructuredReply {
        observation: Some("A solid question.".to_string()),
        ..StructuredReply::default()
    })]);
    let mut widget = MascotWidget::new(fast_config(Persona::Tutor), backend);
    run_reveal(&mut widget).await;

    let mut events = widget.subscribe();
    widget.send_message("why did it gap up?").await;

    let mut processing = Vec::new();
    let mut saw_response = false;
    while let Ok(event) = events.try_recv() {
        match event {
            WidgetEvent::ProcessingChanged { processing: p } => processing.push(p),
            WidgetEvent::AgentResponse { payload } => {
                saw_response = true;
                assert_eq!(payload.observation.as_deref(), Some("A solid question."));
            }
            _ => {}
        }
    }
    assert_eq!(processing, vec![true, false]);
    assert!(saw_response);
}

fn count_role(widget: &MascotWidget, role: MessageRole) -> usize {
    widget
        .messages()
        .iter()
        .filter(|message| message.role == role)
        .count()
}
