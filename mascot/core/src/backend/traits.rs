//! Coaching Backend Traits
//!
//! Trait and wire types for the remote coaching endpoint. The request
//! envelope and profile field names mirror the production API models:
//! snake_case at the top level, camelCase inside the profile record.
//!
//! # Design Philosophy
//!
//! The controller never sees HTTP. It hands a [`CoachRequest`] to a
//! [`CoachBackend`] and gets back either a decoded [`StructuredReply`] or an
//! error; everything transport-specific stays behind the trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Static user-profile record sent with every request.
///
/// The values are placeholders, not derived from actual user state; the
/// backend personalizes its coaching from them all the same.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name
    pub name: String,
    /// Self-reported experience level
    pub trading_level: String,
    /// Preferred learning style
    pub learning_style: String,
    /// Risk tolerance bucket
    pub risk_tolerance: String,
    /// Markets the user trades
    pub preferred_markets: String,
    /// How often the user trades
    pub trading_frequency: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "User".to_string(),
            trading_level: "beginner".to_string(),
            learning_style: "visual".to_string(),
            risk_tolerance: "medium".to_string(),
            preferred_markets: "Stocks".to_string(),
            trading_frequency: "weekly".to_string(),
        }
    }
}

/// Request envelope for the chat and therapy endpoints
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CoachRequest {
    /// The user's message text
    pub message: String,
    /// Static session identifier
    pub session_id: String,
    /// Static user-profile record
    pub user_profile: UserProfile,
}

/// Decoded response record from the coaching endpoint.
///
/// Every named field is optional; display-text derivation tolerates any
/// subset being absent. Unrecognized fields are kept in `extra` so the full
/// payload survives onto the assistant message and out to subscribers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredReply {
    /// Tutor: main teaching explanation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teaching_explanation: Option<String>,
    /// Tutor: what the mascot observed about the trade or question
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    /// Therapy: acknowledgment of the user's emotional state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledgment: Option<String>,
    /// Therapy: insight into triggers and patterns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
    /// Therapy: a question to prompt reflection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub therapeutic_question: Option<String>,
    /// Therapy: one immediate action the user can take
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coping_strategy: Option<String>,
    /// Therapy: motivational closing message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encouragement: Option<String>,
    /// Any additional fields the backend returned
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Coaching backend trait
///
/// Implement this to point the engine at a different transport. The
/// production implementation is [`super::HttpCoachBackend`]; tests use
/// scripted implementations.
#[async_trait]
pub trait CoachBackend: Send + Sync {
    /// Backend name for logging (e.g., "TradeLingo API")
    fn name(&self) -> &str;

    /// Check if the backend is healthy and reachable
    async fn health_check(&self) -> bool;

    /// Send one request and wait for the decoded reply.
    ///
    /// A non-2xx status, transport failure, or undecodable body is an
    /// error; the caller decides how failures surface to the user.
    async fn send(&self, request: &CoachRequest) -> anyhow::Result<StructuredReply>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_serializes_camel_case() {
        let value = serde_json::to_value(UserProfile::default()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["name"], "User");
        assert_eq!(obj["tradingLevel"], "beginner");
        assert_eq!(obj["learningStyle"], "visual");
        assert_eq!(obj["riskTolerance"], "medium");
        assert_eq!(obj["preferredMarkets"], "Stocks");
        assert_eq!(obj["tradingFrequency"], "weekly");
    }

    #[test]
    fn test_request_envelope_shape() {
        let request = CoachRequest {
            message: "what is a stop loss?".to_string(),
            session_id: "default".to_string(),
            user_profile: UserProfile::default(),
        };
        let value = serde_json::to_value(&request).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("message"));
        assert!(obj.contains_key("session_id"));
        assert!(obj["user_profile"].is_object());
    }

    #[test]
    fn test_reply_keeps_unknown_fields() {
        let json = r#"{
            "teaching_explanation": "A stop loss caps your downside.",
            "type": "educational",
            "confidence": 0.9
        }"#;
        let reply: StructuredReply = serde_json::from_str(json).unwrap();
        assert_eq!(
            reply.teaching_explanation.as_deref(),
            Some("A stop loss caps your downside.")
        );
        assert_eq!(reply.extra["type"], "educational");
        assert_eq!(reply.extra["confidence"], 0.9);
    }

    #[test]
    fn test_reply_tolerates_empty_object() {
        let reply: StructuredReply = serde_json::from_str("{}").unwrap();
        assert!(reply.teaching_explanation.is_none());
        assert!(reply.extra.is_empty());
    }
}
