// src/core/types.rs — Core domain types

use serde::{Deserialize, Serialize};

use crate::infra::errors::TweetforgeError;
use crate::provider::TokenUsage;

/// Maximum topic length in characters.
pub const TOPIC_MAX_CHARS: usize = 200;

/// Bounds on the revision cap.
pub const MIN_MAX_ITERATION: u8 = 1;
pub const MAX_MAX_ITERATION: u8 = 5;

/// Evaluation outcome. Closed two-value enumeration; anything else coming
/// back from the critic is a schema violation, never coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approved,
    NeedsImprovement,
}

impl Verdict {
    /// Strict parse of the critic's verdict string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "approved" => Some(Verdict::Approved),
            "needs_improvement" => Some(Verdict::NeedsImprovement),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::NeedsImprovement => "needs_improvement",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable state for one request's trip through the refinement loop.
/// Created fresh per request, discarded after the result is assembled.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub id: String,
    pub topic: String,
    pub tweet: String,
    pub verdict: Verdict,
    pub feedback: String,
    /// Revision counter. Starts at 0, incremented once per revision;
    /// the initial generation does not count.
    pub iteration: u8,
    pub max_iteration: u8,
    /// Every candidate produced, in order. Append-only.
    pub tweet_history: Vec<String>,
    /// Feedback for each candidate, in order. Append-only.
    pub feedback_history: Vec<String>,
    pub usage: TokenUsage,
}

impl SessionState {
    pub fn new(topic: impl Into<String>, max_iteration: u8) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            topic: topic.into(),
            tweet: String::new(),
            verdict: Verdict::NeedsImprovement,
            feedback: String::new(),
            iteration: 0,
            max_iteration,
            tweet_history: Vec::new(),
            feedback_history: Vec::new(),
            usage: TokenUsage::default(),
        }
    }
}

/// Validate caller-supplied inputs before the loop starts.
pub fn validate_inputs(topic: &str, max_iteration: u8) -> Result<(), TweetforgeError> {
    let len = topic.chars().count();
    if topic.trim().is_empty() {
        return Err(TweetforgeError::Validation(
            "topic must not be empty".into(),
        ));
    }
    if len > TOPIC_MAX_CHARS {
        return Err(TweetforgeError::Validation(format!(
            "topic must be at most {TOPIC_MAX_CHARS} characters, got {len}"
        )));
    }
    if !(MIN_MAX_ITERATION..=MAX_MAX_ITERATION).contains(&max_iteration) {
        return Err(TweetforgeError::Validation(format!(
            "max_iteration must be between {MIN_MAX_ITERATION} and {MAX_MAX_ITERATION}, got {max_iteration}"
        )));
    }
    Ok(())
}

/// One entry in the refinement history: a candidate, the critic's feedback
/// on it, and its verdict. Iteration index is 1-based for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRecord {
    pub iteration: u32,
    pub tweet: String,
    pub feedback: String,
    pub evaluation: Verdict,
}

/// Final result of one refinement run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetResult {
    pub final_tweet: String,
    pub evaluation: Verdict,
    /// Total revisions performed (not counting the initial generation).
    pub total_iterations: u8,
    pub history: Vec<DraftRecord>,
    pub topic: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── Verdict ────────────────────────────────────────────────

    #[test]
    fn test_verdict_parse_valid() {
        assert_eq!(Verdict::parse("approved"), Some(Verdict::Approved));
        assert_eq!(
            Verdict::parse("needs_improvement"),
            Some(Verdict::NeedsImprovement)
        );
    }

    #[test]
    fn test_verdict_parse_rejects_third_value() {
        assert_eq!(Verdict::parse("maybe"), None);
        assert_eq!(Verdict::parse("APPROVED"), None);
        assert_eq!(Verdict::parse(""), None);
        assert_eq!(Verdict::parse("needs-improvement"), None);
    }

    #[test]
    fn test_verdict_serde_strings() {
        assert_eq!(
            serde_json::to_string(&Verdict::Approved).unwrap(),
            "\"approved\""
        );
        assert_eq!(
            serde_json::to_string(&Verdict::NeedsImprovement).unwrap(),
            "\"needs_improvement\""
        );
        let v: Verdict = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(v, Verdict::Approved);
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::Approved.to_string(), "approved");
        assert_eq!(Verdict::NeedsImprovement.to_string(), "needs_improvement");
    }

    // ─── SessionState ───────────────────────────────────────────

    #[test]
    fn test_session_state_new() {
        let s = SessionState::new("coffee", 3);
        assert_eq!(s.topic, "coffee");
        assert_eq!(s.iteration, 0);
        assert_eq!(s.max_iteration, 3);
        assert!(s.tweet_history.is_empty());
        assert!(s.feedback_history.is_empty());
        assert!(!s.id.is_empty());
    }

    #[test]
    fn test_session_state_unique_ids() {
        let a = SessionState::new("a", 1);
        let b = SessionState::new("b", 1);
        assert_ne!(a.id, b.id);
    }

    // ─── validate_inputs ────────────────────────────────────────

    #[test]
    fn test_validate_empty_topic_rejected() {
        assert!(validate_inputs("", 3).is_err());
        assert!(validate_inputs("   ", 3).is_err());
    }

    #[test]
    fn test_validate_topic_length_boundary() {
        let exactly_200: String = "x".repeat(200);
        assert!(validate_inputs(&exactly_200, 3).is_ok());

        let too_long: String = "x".repeat(201);
        assert!(matches!(
            validate_inputs(&too_long, 3),
            Err(TweetforgeError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_topic_length_in_chars_not_bytes() {
        // 200 multi-byte characters is 600 bytes but still within bounds
        let topic: String = "é".repeat(200);
        assert!(validate_inputs(&topic, 3).is_ok());
    }

    #[test]
    fn test_validate_cap_bounds() {
        assert!(validate_inputs("coffee", 0).is_err());
        assert!(validate_inputs("coffee", 1).is_ok());
        assert!(validate_inputs("coffee", 5).is_ok());
        assert!(validate_inputs("coffee", 6).is_err());
    }

    // ─── TweetResult serialization ──────────────────────────────

    #[test]
    fn test_result_wire_format() {
        let result = TweetResult {
            final_tweet: "Coffee: the original productivity hack.".into(),
            evaluation: Verdict::Approved,
            total_iterations: 1,
            history: vec![DraftRecord {
                iteration: 1,
                tweet: "draft".into(),
                feedback: "too flat".into(),
                evaluation: Verdict::NeedsImprovement,
            }],
            topic: "coffee".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["evaluation"], "approved");
        assert_eq!(json["total_iterations"], 1);
        assert_eq!(json["history"][0]["iteration"], 1);
        assert_eq!(json["history"][0]["evaluation"], "needs_improvement");
        assert_eq!(json["topic"], "coffee");
    }
}
