// src/api/types.rs

use serde::{Deserialize, Serialize};

/// Request body for generating a tweet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetRequest {
    pub topic: String,
    /// Revision cap (1-5). Falls back to the configured default when unset.
    #[serde(default)]
    pub max_iteration: Option<u8>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
