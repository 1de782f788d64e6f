//! Mascot CLI
//!
//! A thin line-oriented surface for the SuperBear widget engine. It owns a
//! single [`MascotWidget`], ticks it on an interval, forwards stdin lines as
//! messages, and renders engine events as plain text. All widget logic lives
//! in `mascot-core`; this binary only observes.
//!
//! # Usage
//!
//! ```bash
//! # Talk to the tutor on the default backend (localhost:8000)
//! mascot-cli
//!
//! # Therapy persona against a remote backend
//! mascot-cli --persona therapy --host api.example.com --port 9000
//!
//! # With verbose logging
//! RUST_LOG=debug mascot-cli
//! ```
//!
//! # Environment Variables
//!
//! - `SUPERBEAR_API_HOST`: backend host (default: localhost)
//! - `SUPERBEAR_API_PORT`: backend port (default: 8000)
//! - `SUPERBEAR_PERSONA`: `tutor` or `therapy`
//! - `RUST_LOG`: log level (trace, debug, info, warn, error)

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tracing::{debug, info, warn};

use mascot_core::{
    CoachBackend, ConfigOverrides, HttpCoachBackend, MascotWidget, MessageRole, Persona,
    SendOutcome, Stage, WidgetEvent, WidgetSettings,
};

/// How often the widget's timers are advanced
const TICK_INTERVAL: Duration = Duration::from_millis(25);

/// Line-oriented surface for the SuperBear mascot engine
#[derive(Debug, Parser)]
#[command(name = "mascot-cli", version, about)]
struct Args {
    /// Backend host
    #[arg(long, env = "SUPERBEAR_API_HOST")]
    host: Option<String>,

    /// Backend port
    #[arg(long, env = "SUPERBEAR_API_PORT")]
    port: Option<u16>,

    /// Persona: tutor or therapy
    #[arg(long)]
    persona: Option<Persona>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            persona: self.persona,
            typewriter_interval_ms: None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mascot_cli=info".parse()?)
                .add_directive("mascot_core=info".parse()?),
        )
        .with_target(true)
        .init();

    let args = Args::parse();
    let settings = WidgetSettings::resolve(load_config_file()?, args.overrides())?;
    info!(
        host = %settings.host,
        port = settings.port,
        persona = ?settings.persona,
        "starting mascot surface"
    );

    let backend = Arc::new(HttpCoachBackend::new(
        settings.host.clone(),
        settings.port,
        settings.persona,
    ));
    if !backend.health_check().await {
        warn!("backend health check failed; replies will apologize until it comes up");
    }

    let mut widget = MascotWidget::new(settings.persona_config(), backend);
    let mut events = widget.subscribe();
    let mut renderer = Renderer::new(
        widget.config().greeting.clone(),
        widget.config().remark.clone(),
    );

    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                widget.tick();
            }
            event = events.recv() => {
                match event {
                    Ok(event) => renderer.render(&event),
                    Err(error) => debug!(%error, "event stream lagged"),
                }
            }
            line = lines.next() => {
                match line {
                    Some(Ok(line)) => {
                        if widget.send_message(&line).await == SendOutcome::Rejected {
                            debug!("message rejected (empty or already pending)");
                        }
                    }
                    Some(Err(error)) => {
                        warn!(%error, "stdin read failed");
                        break;
                    }
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    widget.teardown();
    info!("goodbye");
    Ok(())
}

/// Load the TOML config file if one exists at the default path
fn load_config_file() -> anyhow::Result<Option<mascot_core::ConfigFile>> {
    match mascot_core::default_config_path() {
        Some(path) if path.exists() => Ok(Some(mascot_core::ConfigFile::load(&path)?)),
        _ => Ok(None),
    }
}

/// Renders engine events as plain lines
struct Renderer {
    /// Full greeting, to detect the typewriter finishing
    greeting: String,
    /// Remark shown at the remark stage
    remark: Option<String>,
    /// Whether the finished greeting has been printed
    greeting_printed: bool,
}

impl Renderer {
    fn new(greeting: String, remark: Option<String>) -> Self {
        Self {
            greeting,
            remark,
            greeting_printed: false,
        }
    }

    fn render(&mut self, event: &WidgetEvent) {
        match event {
            WidgetEvent::StageChanged { stage } => match stage {
                Stage::Init => {}
                Stage::MascotShown => println!("· SuperBear wanders in"),
                Stage::RemarkShown => {
                    if let Some(remark) = &self.remark {
                        println!("· SuperBear: {remark}");
                    }
                }
                Stage::BubbleShown => println!("· a speech bubble pops up"),
            },
            WidgetEvent::GreetingUpdated { text } => {
                if !self.greeting_printed && *text == self.greeting {
                    println!("SuperBear: {text}");
                    self.greeting_printed = true;
                }
            }
            WidgetEvent::MessageAppended { message } => match message.role {
                // The user typed this line themselves; don't echo it.
                MessageRole::User => {}
                MessageRole::Assistant => println!("SuperBear: {}", message.content),
            },
            WidgetEvent::ProcessingChanged { processing } => {
                if *processing {
                    print!("SuperBear is thinking...\r");
                    let _ = std::io::stdout().flush();
                }
            }
            WidgetEvent::AgentResponse { payload } => {
                debug!(?payload, "structured payload received");
            }
        }
    }
}
