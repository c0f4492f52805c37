// src/provider/resolver.rs — Provider discovery from environment

use std::sync::Arc;

use super::anthropic::AnthropicProvider;
use super::openai_compat::OpenAICompatProvider;
use super::retry::RetryProvider;
use super::{ModelProvider, ModelRef};
use crate::infra::errors::TweetforgeError;

/// Default models per provider when the user doesn't pick one.
const GROQ_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const OPENAI_DEFAULT_MODEL: &str = "gpt-4.1-mini";
const ANTHROPIC_DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Discover a provider from environment variables, wrapped in transport-level
/// retry. Precedence: GROQ_API_KEY > OPENAI_API_KEY > ANTHROPIC_API_KEY.
///
/// Returns the provider plus the default model ref to use with it.
pub fn discover_provider() -> Result<(Arc<dyn ModelProvider>, ModelRef), TweetforgeError> {
    if let Ok(key) = std::env::var("GROQ_API_KEY") {
        let provider: Arc<dyn ModelProvider> =
            Arc::new(RetryProvider::new(Arc::new(OpenAICompatProvider::groq(key))));
        return Ok((provider, ModelRef::new("groq", GROQ_DEFAULT_MODEL)));
    }

    if let Ok(key) = std::env::var("OPENAI_API_KEY") {
        let provider: Arc<dyn ModelProvider> =
            Arc::new(RetryProvider::new(Arc::new(OpenAICompatProvider::openai(key))));
        return Ok((provider, ModelRef::new("openai", OPENAI_DEFAULT_MODEL)));
    }

    if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
        let provider: Arc<dyn ModelProvider> =
            Arc::new(RetryProvider::new(Arc::new(AnthropicProvider::new(key))));
        return Ok((provider, ModelRef::new("anthropic", ANTHROPIC_DEFAULT_MODEL)));
    }

    Err(TweetforgeError::NoProvider)
}
