// src/infra/errors.rs — Error types for tweetforge

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TweetforgeError {
    // Provider errors (retriable)
    #[error("Provider '{provider}' error: {message}")]
    Provider {
        provider: String,
        message: String,
        retriable: bool,
    },

    #[error("Rate limited by '{provider}', retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: u64,
    },

    // Loop errors (not retriable — the refinement loop never retries a failed step)
    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Evaluator verdict violated the expected schema: {0}")]
    SchemaViolation(String),

    // User errors
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("No provider configured. Set GROQ_API_KEY, OPENAI_API_KEY, or ANTHROPIC_API_KEY.")]
    NoProvider,

    // Infra
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TweetforgeError {
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            TweetforgeError::Provider {
                retriable: true,
                ..
            } | TweetforgeError::RateLimited { .. }
        )
    }
}
