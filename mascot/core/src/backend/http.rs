//! HTTP Backend Implementation
//!
//! [`CoachBackend`] over the TradeLingo REST API:
//!
//! - `POST /api/chat` - tutoring responses
//! - `POST /api/therapy` - wellness responses
//! - `GET /api/health` - health check
//!
//! Both POST endpoints accept the same `{message, session_id, user_profile}`
//! envelope and return a JSON object with optional named text fields.

use std::time::Duration;

use async_trait::async_trait;

use super::traits::{CoachBackend, CoachRequest, StructuredReply};
use crate::persona::Persona;

/// HTTP client for the TradeLingo coaching API
#[derive(Clone)]
pub struct HttpCoachBackend {
    /// Host address
    host: String,
    /// Port number
    port: u16,
    /// Which POST endpoint this backend targets
    persona: Persona,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpCoachBackend {
    /// Create a new backend for the given persona's endpoint
    pub fn new(host: impl Into<String>, port: u16, persona: Persona) -> Self {
        Self {
            host: host.into(),
            port,
            persona,
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Get the base URL
    fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Get the POST endpoint URL for this persona
    fn coach_url(&self) -> String {
        format!("{}{}", self.base_url(), self.persona.endpoint_path())
    }

    /// Get the health endpoint URL
    fn health_url(&self) -> String {
        format!("{}/api/health", self.base_url())
    }
}

#[async_trait]
impl CoachBackend for HttpCoachBackend {
    fn name(&self) -> &str {
        "TradeLingo API"
    }

    async fn health_check(&self) -> bool {
        self.http_client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .is_ok_and(|response| response.status().is_success())
    }

    async fn send(&self, request: &CoachRequest) -> anyhow::Result<StructuredReply> {
        let url = self.coach_url();

        let response = self.http_client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("coaching endpoint returned {status}: {body}");
        }

        let reply: StructuredReply = response.json().await?;
        Ok(reply)
    }
}
