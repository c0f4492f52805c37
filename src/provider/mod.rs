// src/provider/mod.rs — Model provider layer

pub mod anthropic;
pub mod openai_compat;
pub mod resolver;
pub mod retry;
pub mod roles;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::infra::errors::TweetforgeError;

/// Core trait that all model providers implement.
///
/// Two operations: free-text completion and structured completion. The
/// structured variant constrains the backend's output to the given JSON
/// schema; how that is enforced (response_format, forced tool call) is up
/// to the adapter.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, TweetforgeError>;

    async fn complete_structured(
        &self,
        request: CompletionRequest,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value, TweetforgeError>;
}

#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub model: String,
    pub system: Option<String>,
    pub messages: Vec<Message>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct Completion {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }

    pub fn add(&mut self, other: &TokenUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

/// Reference to a specific model on a specific provider.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ModelRef {
    pub provider: String,
    pub model: String,
}

impl ModelRef {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
        }
    }

    /// Parse "provider/model" format
    pub fn parse(s: &str) -> Option<Self> {
        let (provider, model) = s.split_once('/')?;
        Some(Self {
            provider: provider.to_string(),
            model: model.to_string(),
        })
    }
}

impl std::fmt::Display for ModelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.provider, self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── ModelRef tests ─────────────────────────────────────────

    #[test]
    fn test_model_ref_new() {
        let r = ModelRef::new("groq", "llama-3.3-70b-versatile");
        assert_eq!(r.provider, "groq");
        assert_eq!(r.model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_model_ref_parse() {
        let r = ModelRef::parse("groq/llama-3.3-70b-versatile").unwrap();
        assert_eq!(r.provider, "groq");
        assert_eq!(r.model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_model_ref_parse_no_slash() {
        assert!(ModelRef::parse("no-slash").is_none());
    }

    #[test]
    fn test_model_ref_parse_empty() {
        assert!(ModelRef::parse("").is_none());
    }

    #[test]
    fn test_model_ref_display() {
        let r = ModelRef::new("anthropic", "claude-sonnet-4-20250514");
        assert_eq!(format!("{}", r), "anthropic/claude-sonnet-4-20250514");
    }

    // ─── TokenUsage tests ───────────────────────────────────────

    #[test]
    fn test_token_usage_total() {
        let u = TokenUsage {
            input_tokens: 100,
            output_tokens: 50,
        };
        assert_eq!(u.total(), 150);
    }

    #[test]
    fn test_token_usage_add() {
        let mut u = TokenUsage {
            input_tokens: 100,
            output_tokens: 50,
        };
        u.add(&TokenUsage {
            input_tokens: 30,
            output_tokens: 20,
        });
        assert_eq!(u.input_tokens, 130);
        assert_eq!(u.output_tokens, 70);
    }

    // ─── Message tests ──────────────────────────────────────────

    #[test]
    fn test_message_user() {
        let m = Message::user("Hello");
        assert_eq!(m.role, Role::User);
        assert_eq!(m.content, "Hello");
    }

    #[test]
    fn test_message_assistant() {
        let m = Message::assistant("Sure!");
        assert_eq!(m.role, Role::Assistant);
    }
}
