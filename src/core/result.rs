// src/core/result.rs — Result assembly

use super::types::{DraftRecord, SessionState, TweetResult, Verdict};

/// Build the final result record from a finished session.
///
/// Candidates and feedback are paired positionally in generation order.
/// Every entry except the last is needs_improvement by construction (only
/// a rejection triggers another candidate); the last entry carries the
/// literal terminal verdict, which may still be needs_improvement when the
/// cap ran out. Pure and infallible given a well-formed session.
pub fn assemble(session: &SessionState) -> TweetResult {
    let last = session.tweet_history.len();
    let history = session
        .tweet_history
        .iter()
        .zip(session.feedback_history.iter())
        .enumerate()
        .map(|(i, (tweet, feedback))| DraftRecord {
            iteration: i as u32 + 1,
            tweet: tweet.clone(),
            feedback: feedback.clone(),
            evaluation: if i + 1 == last {
                session.verdict
            } else {
                Verdict::NeedsImprovement
            },
        })
        .collect();

    TweetResult {
        final_tweet: session.tweet.clone(),
        evaluation: session.verdict,
        total_iterations: session.iteration,
        history,
        topic: session.topic.clone(),
    }
}
