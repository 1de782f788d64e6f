//! Widget Configuration
//!
//! Layered configuration for the widget and its backend connection.
//!
//! # Priority (highest first)
//!
//! 1. Explicit overrides (CLI arguments, or [`ConfigOverrides::from_env`])
//! 2. TOML configuration file
//! 3. Defaults
//!
//! # File location
//!
//! `$XDG_CONFIG_HOME/tradelingo/widget.toml` (typically
//! `~/.config/tradelingo/widget.toml`). A missing file is not an error;
//! a malformed one is.
//!
//! # Example
//!
//! ```toml
//! [backend]
//! host = "localhost"
//! port = 8000
//!
//! [widget]
//! persona = "tutor"
//! typewriter_interval_ms = 50
//! ```
//!
//! # Environment Variables
//!
//! - `SUPERBEAR_API_HOST`: backend host
//! - `SUPERBEAR_API_PORT`: backend port
//! - `SUPERBEAR_PERSONA`: `tutor` or `therapy`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persona::{Persona, PersonaConfig, UnknownPersona};

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The persona name is not recognized
    #[error(transparent)]
    UnknownPersona(#[from] UnknownPersona),

    /// The port value is not a valid u16
    #[error("invalid port '{0}'")]
    InvalidPort(String),
}

/// `[backend]` section of the config file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BackendToml {
    /// Backend host
    pub host: Option<String>,
    /// Backend port
    pub port: Option<u16>,
}

/// `[widget]` section of the config file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WidgetToml {
    /// Persona name (`tutor` or `therapy`)
    pub persona: Option<String>,
    /// Typewriter step interval in milliseconds
    pub typewriter_interval_ms: Option<u64>,
}

/// Root of the TOML configuration file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Backend connection settings
    #[serde(default)]
    pub backend: BackendToml,
    /// Widget behavior settings
    #[serde(default)]
    pub widget: WidgetToml,
}

impl ConfigFile {
    /// Parse a configuration file from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

/// Overrides applied after the file layer (CLI or environment)
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Backend host
    pub host: Option<String>,
    /// Backend port
    pub port: Option<u16>,
    /// Persona selection
    pub persona: Option<Persona>,
    /// Typewriter step interval in milliseconds
    pub typewriter_interval_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Collect overrides from `SUPERBEAR_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("SUPERBEAR_API_HOST").ok();
        let port = match std::env::var("SUPERBEAR_API_PORT") {
            Ok(raw) => Some(
                raw.parse::<u16>()
                    .map_err(|_| ConfigError::InvalidPort(raw))?,
            ),
            Err(_) => None,
        };
        let persona = match std::env::var("SUPERBEAR_PERSONA") {
            Ok(raw) => Some(raw.parse::<Persona>()?),
            Err(_) => None,
        };
        Ok(Self {
            host,
            port,
            persona,
            typewriter_interval_ms: None,
        })
    }
}

/// Fully resolved widget settings
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetSettings {
    /// Backend host
    pub host: String,
    /// Backend port
    pub port: u16,
    /// Persona selection
    pub persona: Persona,
    /// Typewriter step interval
    pub typewriter_interval: Duration,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8000,
            persona: Persona::Tutor,
            typewriter_interval: PersonaConfig::DEFAULT_TYPEWRITER_INTERVAL,
        }
    }
}

impl WidgetSettings {
    /// Resolve settings from the file layer and the override layer
    pub fn resolve(
        file: Option<ConfigFile>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Some(file) = file {
            if let Some(host) = file.backend.host {
                settings.host = host;
            }
            if let Some(port) = file.backend.port {
                settings.port = port;
            }
            if let Some(persona) = file.widget.persona {
                settings.persona = persona.parse()?;
            }
            if let Some(ms) = file.widget.typewriter_interval_ms {
                settings.typewriter_interval = Duration::from_millis(ms);
            }
        }

        if let Some(host) = overrides.host {
            settings.host = host;
        }
        if let Some(port) = overrides.port {
            settings.port = port;
        }
        if let Some(persona) = overrides.persona {
            settings.persona = persona;
        }
        if let Some(ms) = overrides.typewriter_interval_ms {
            settings.typewriter_interval = Duration::from_millis(ms);
        }

        Ok(settings)
    }

    /// Resolve from the default file path and the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let file = match default_config_path() {
            Some(path) if path.exists() => Some(ConfigFile::load(&path)?),
            _ => None,
        };
        Self::resolve(file, ConfigOverrides::from_env()?)
    }

    /// Build the persona configuration these settings describe
    #[must_use]
    pub fn persona_config(&self) -> PersonaConfig {
        PersonaConfig::for_persona(self.persona)
            .with_typewriter_interval(self.typewriter_interval)
    }
}

/// Default configuration file path, if a config directory exists
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tradelingo").join("widget.toml"))
}
