//! Mascot Core - Staged Conversational Widget Engine for TradeLingo
//!
//! This crate provides the state-machine core of the SuperBear mascot
//! widget, completely independent of any UI framework. It can drive a web
//! surface, a terminal surface, or run headless for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       UI Surfaces                          │
//! │      ┌─────────┐   ┌─────────┐   ┌────────────────────┐    │
//! │      │   Web   │   │   CLI   │   │      Headless      │    │
//! │      └────┬────┘   └────┬────┘   └─────────┬──────────┘    │
//! │           └─────────────┴─────────────────┘                │
//! │                         │                                  │
//! │            tick / send_message (down)                      │
//! │                WidgetEvent (up)                            │
//! │                         │                                  │
//! └─────────────────────────┼──────────────────────────────────┘
//! ┌─────────────────────────┼──────────────────────────────────┐
//! │                   MASCOT CORE                              │
//! │  ┌──────────────────────┴───────────────────────────────┐  │
//! │  │                  MascotWidget                        │  │
//! │  │ ┌─────────┐ ┌──────────┐ ┌──────────┐ ┌───────────┐  │  │
//! │  │ │  Stage  │ │Typewriter│ │   Chat   │ │  Coach    │  │  │
//! │  │ │Sequencer│ │          │ │Controller│ │  Backend  │  │  │
//! │  │ └─────────┘ └──────────┘ └──────────┘ └───────────┘  │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`MascotWidget`]: one widget instance - reveal, greeting, chat
//! - [`PersonaConfig`]: parameterizes tutoring vs. therapy behavior
//! - [`StageSequencer`]: timed mascot → remark → bubble reveal
//! - [`Typewriter`]: incremental greeting reveal
//! - [`ChatController`]: send protocol against the coaching endpoint
//! - [`WidgetEvent`]: events surfaces subscribe to
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use mascot_core::{HttpCoachBackend, MascotWidget, Persona, PersonaConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = Arc::new(HttpCoachBackend::new("localhost", 8000, Persona::Tutor));
//!     let mut widget = MascotWidget::new(PersonaConfig::tutor(), backend);
//!     let mut events = widget.subscribe();
//!
//!     let mut ticker = tokio::time::interval(Duration::from_millis(25));
//!     loop {
//!         tokio::select! {
//!             _ = ticker.tick() => { widget.tick(); }
//!             Ok(event) = events.recv() => { /* render */ }
//!         }
//!     }
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`reveal`]: stage sequencer and typewriter
//! - [`controller`]: chat send protocol
//! - [`session`]: session state with explicit mutation methods
//! - [`backend`]: coaching endpoint abstraction (HTTP + trait)
//! - [`persona`]: tutoring/therapy parameterization and reply derivation
//! - [`events`]: broadcast event bus for embedding contexts
//! - [`scroll`]: bottom-pinned viewport state
//! - [`timer`]: cancellable countdown primitives
//! - [`config`]: layered TOML/env configuration
//!
//! # No UI Dependencies
//!
//! This crate has **zero** dependencies on any rendering framework. It's
//! pure widget logic that can be observed from anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod config;
pub mod controller;
pub mod events;
pub mod messages;
pub mod persona;
pub mod reveal;
pub mod scroll;
pub mod session;
pub mod timer;
pub mod widget;

// Re-exports for convenience
pub use backend::{CoachBackend, CoachRequest, HttpCoachBackend, StructuredReply, UserProfile};
pub use config::{default_config_path, ConfigError, ConfigFile, ConfigOverrides, WidgetSettings};
pub use controller::{ChatController, SendOutcome};
pub use events::{EventBus, WidgetEvent};
pub use messages::{ChatMessage, MessageId, MessageRole};
pub use persona::{Persona, PersonaConfig, UnknownPersona, CONNECTION_APOLOGY};
pub use reveal::{Stage, StageSchedule, StageSequencer, Typewriter};
pub use scroll::ScrollSync;
pub use session::ChatSession;
pub use timer::Countdown;
pub use widget::MascotWidget;
