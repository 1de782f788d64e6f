//! Mascot Personas
//!
//! The tutoring and therapy mascots share one engine; a [`Persona`] plus a
//! [`PersonaConfig`] carries everything that differs between them: greeting
//! text, whether a remark stage exists, which endpoint the controller posts
//! to, the static session identifier, and the reply-derivation strategy.
//!
//! # Reply derivation
//!
//! The backend returns a record of optional text fields. The tutor picks the
//! first present field in a fixed priority order; the therapist concatenates
//! every present field in a fixed order, separated by blank lines. Absent or
//! empty fields are never an error - derivation always produces some text.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::StructuredReply;
use crate::reveal::StageSchedule;

/// Shown when the tutor reply carries none of the expected fields
const TUTOR_FALLBACK: &str = "I couldn't generate a response. Please try again.";

/// Shown when the therapy reply carries none of the expected fields
const THERAPY_FALLBACK: &str = "I'm here for you. Tell me a bit more about what's on your mind.";

/// Prefix marking the coping-strategy section of a therapy reply
const COPING_MARKER: &str = "💡 Try this: ";

/// Shown when the remote call fails for any reason
pub const CONNECTION_APOLOGY: &str =
    "Sorry, I'm having trouble connecting right now. Please make sure the backend is running and try again.";

/// Which mascot variant the engine is running
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Persona {
    /// Trading tutor (chat endpoint, teaching-first replies)
    Tutor,
    /// Trading-psychology coach (therapy endpoint, wellness replies)
    Therapy,
}

/// Error for unrecognized persona names in config or CLI input
#[derive(Debug, Error)]
#[error("unknown persona '{0}' (expected \"tutor\" or \"therapy\")")]
pub struct UnknownPersona(pub String);

impl FromStr for Persona {
    type Err = UnknownPersona;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tutor" | "tutoring" => Ok(Self::Tutor),
            "therapy" => Ok(Self::Therapy),
            other => Err(UnknownPersona(other.to_string())),
        }
    }
}

impl Persona {
    /// API path the controller posts to
    #[must_use]
    pub fn endpoint_path(self) -> &'static str {
        match self {
            Self::Tutor => "/api/chat",
            Self::Therapy => "/api/therapy",
        }
    }

    /// Static session identifier sent with every request
    #[must_use]
    pub fn default_session_id(self) -> &'static str {
        match self {
            Self::Tutor => "default",
            Self::Therapy => "therapy-default",
        }
    }

    /// Greeting the typewriter reveals once the speech bubble appears
    #[must_use]
    pub fn default_greeting(self) -> &'static str {
        match self {
            Self::Tutor => {
                "Hi, I'm SuperBear! Ask me anything about trading and I'll break it down for you."
            }
            Self::Therapy => "Hey, I'm here for you. How are you feeling about your trading today?",
        }
    }

    /// Remark shown between mascot and bubble (tutor only)
    #[must_use]
    pub fn default_remark(self) -> Option<&'static str> {
        match self {
            Self::Tutor => Some("Rawr!"),
            Self::Therapy => None,
        }
    }

    /// Derive the assistant-visible text from a structured reply.
    ///
    /// Deterministic: the same reply always produces the same text.
    #[must_use]
    pub fn derive_reply_text(self, reply: &StructuredReply) -> String {
        match self {
            Self::Tutor => present(&reply.teaching_explanation)
                .or_else(|| present(&reply.observation))
                .map_or_else(|| TUTOR_FALLBACK.to_string(), str::to_string),
            Self::Therapy => {
                let mut parts: Vec<String> = Vec::new();
                if let Some(text) = present(&reply.acknowledgment) {
                    parts.push(text.to_string());
                }
                if let Some(text) = present(&reply.insight) {
                    parts.push(text.to_string());
                }
                if let Some(text) = present(&reply.therapeutic_question) {
                    parts.push(text.to_string());
                }
                if let Some(text) = present(&reply.coping_strategy) {
                    parts.push(format!("{COPING_MARKER}{text}"));
                }
                if let Some(text) = present(&reply.encouragement) {
                    parts.push(text.to_string());
                }
                if parts.is_empty() {
                    THERAPY_FALLBACK.to_string()
                } else {
                    parts.join("\n\n")
                }
            }
        }
    }
}

/// A field counts as present only when it holds non-empty text
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|text| !text.is_empty())
}

/// Everything that parameterizes one widget instance
#[derive(Clone, Debug)]
pub struct PersonaConfig {
    /// Which variant this widget runs
    pub persona: Persona,
    /// Greeting string the typewriter reveals
    pub greeting: String,
    /// Remark shown at the remark stage; `None` skips that stage entirely
    pub remark: Option<String>,
    /// Session identifier sent with every request
    pub session_id: String,
    /// Typewriter step interval
    pub typewriter_interval: Duration,
    /// Reveal-stage delays
    pub schedule: StageSchedule,
}

impl PersonaConfig {
    /// Typewriter step interval (one character per step)
    pub const DEFAULT_TYPEWRITER_INTERVAL: Duration = Duration::from_millis(50);

    /// Configuration for the given persona with all defaults
    #[must_use]
    pub fn for_persona(persona: Persona) -> Self {
        Self {
            persona,
            greeting: persona.default_greeting().to_string(),
            remark: persona.default_remark().map(str::to_string),
            session_id: persona.default_session_id().to_string(),
            typewriter_interval: Self::DEFAULT_TYPEWRITER_INTERVAL,
            schedule: StageSchedule::default(),
        }
    }

    /// Tutoring mascot defaults
    #[must_use]
    pub fn tutor() -> Self {
        Self::for_persona(Persona::Tutor)
    }

    /// Therapy mascot defaults
    #[must_use]
    pub fn therapy() -> Self {
        Self::for_persona(Persona::Therapy)
    }

    /// Override the greeting string
    #[must_use]
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Override the reveal schedule
    #[must_use]
    pub fn with_schedule(mut self, schedule: StageSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Override the typewriter step interval
    #[must_use]
    pub fn with_typewriter_interval(mut self, interval: Duration) -> Self {
        self.typewriter_interval = interval;
        self
    }
}
