// src/core/engine.rs — The refinement loop controller

use std::sync::Arc;

use super::prompts;
use super::result::assemble;
use super::types::{validate_inputs, SessionState, TweetResult, Verdict};
use crate::infra::errors::TweetforgeError;
use crate::provider::roles::{ModelRoles, RoleModel};
use crate::provider::{CompletionRequest, Message, ModelProvider};

/// Cap on generated tweet length, in tokens. Tweets are short; this mostly
/// guards against runaway output.
const STEP_MAX_TOKENS: u32 = 512;
const EVAL_MAX_TOKENS: u32 = 1024;

/// Loop states. Termination is bounded by the iteration cap: Revising is
/// only reachable while `iteration < max_iteration`, and each pass through
/// it increments the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Generating,
    Evaluating,
    Revising,
    Done,
}

/// Drives one topic through generate → evaluate → (revise → evaluate)*.
///
/// Holds no per-request state: each `run` owns its own `SessionState`, so
/// a single engine can serve concurrent requests.
pub struct RefineEngine {
    provider: Arc<dyn ModelProvider>,
    roles: ModelRoles,
}

impl RefineEngine {
    pub fn new(provider: Arc<dyn ModelProvider>, roles: ModelRoles) -> Self {
        Self { provider, roles }
    }

    /// Run the full refinement loop for a topic and assemble the result.
    ///
    /// Any step failure aborts the whole run; the loop never retries a
    /// failed step.
    pub async fn run(
        &self,
        topic: &str,
        max_iteration: u8,
    ) -> Result<TweetResult, TweetforgeError> {
        validate_inputs(topic, max_iteration)?;

        let mut session = SessionState::new(topic, max_iteration);
        let mut state = LoopState::Generating;

        tracing::info!(
            session = %session.id,
            topic = %session.topic,
            max_iteration = session.max_iteration,
            "starting refinement loop",
        );

        loop {
            state = match state {
                LoopState::Generating => {
                    self.generate(&mut session).await?;
                    LoopState::Evaluating
                }
                LoopState::Evaluating => {
                    self.evaluate(&mut session).await?;
                    if session.verdict == Verdict::Approved
                        || session.iteration >= session.max_iteration
                    {
                        LoopState::Done
                    } else {
                        LoopState::Revising
                    }
                }
                LoopState::Revising => {
                    self.revise(&mut session).await?;
                    LoopState::Evaluating
                }
                LoopState::Done => break,
            };
        }

        debug_assert_eq!(
            session.tweet_history.len(),
            session.iteration as usize + 1,
            "one candidate per revision plus the initial generation",
        );
        debug_assert_eq!(session.tweet_history.len(), session.feedback_history.len());

        tracing::info!(
            session = %session.id,
            verdict = %session.verdict,
            revisions = session.iteration,
            total_tokens = session.usage.total(),
            "refinement loop finished",
        );

        Ok(assemble(&session))
    }

    /// Initial generation: topic → first candidate.
    async fn generate(&self, session: &mut SessionState) -> Result<(), TweetforgeError> {
        let prompt = prompts::generation_prompt(&session.topic);
        let tweet = self
            .text_step(&self.roles.generator, prompts::GENERATOR_SYSTEM, prompt, session)
            .await?;

        tracing::debug!(session = %session.id, chars = tweet.chars().count(), "generated candidate");
        session.tweet = tweet.clone();
        session.tweet_history.push(tweet);
        Ok(())
    }

    /// Evaluation: current candidate → verdict + feedback, via structured
    /// completion. Sees only the current candidate, never the history.
    async fn evaluate(&self, session: &mut SessionState) -> Result<(), TweetforgeError> {
        let role = &self.roles.evaluator;
        let request = CompletionRequest {
            model: role.model.model.clone(),
            system: Some(prompts::EVALUATOR_SYSTEM.into()),
            messages: vec![Message::user(prompts::evaluation_prompt(&session.tweet))],
            max_tokens: Some(EVAL_MAX_TOKENS),
            temperature: Some(role.temperature),
        };

        let value = self
            .provider
            .complete_structured(request, &prompts::verdict_schema())
            .await?;

        let verdict_str = value["evaluation"].as_str().ok_or_else(|| {
            TweetforgeError::SchemaViolation("missing 'evaluation' field".into())
        })?;
        let verdict = Verdict::parse(verdict_str).ok_or_else(|| {
            TweetforgeError::SchemaViolation(format!(
                "'{verdict_str}' is not one of: approved, needs_improvement"
            ))
        })?;
        let feedback = value["feedback"]
            .as_str()
            .ok_or_else(|| TweetforgeError::SchemaViolation("missing 'feedback' field".into()))?
            .to_string();

        tracing::debug!(session = %session.id, verdict = %verdict, "evaluated candidate");
        session.verdict = verdict;
        session.feedback = feedback.clone();
        session.feedback_history.push(feedback);
        Ok(())
    }

    /// Revision: previous candidate + feedback + topic → new candidate.
    /// Increments the iteration counter.
    async fn revise(&self, session: &mut SessionState) -> Result<(), TweetforgeError> {
        let prompt =
            prompts::revision_prompt(&session.topic, &session.tweet, &session.feedback);
        let tweet = self
            .text_step(&self.roles.reviser, prompts::REVISER_SYSTEM, prompt, session)
            .await?;

        session.iteration += 1;
        tracing::debug!(
            session = %session.id,
            iteration = session.iteration,
            "revised candidate",
        );
        session.tweet = tweet.clone();
        session.tweet_history.push(tweet);
        Ok(())
    }

    /// Shared free-text completion for the generate and revise steps.
    /// Empty or whitespace-only output is a generation failure.
    async fn text_step(
        &self,
        role: &RoleModel,
        system: &str,
        prompt: String,
        session: &mut SessionState,
    ) -> Result<String, TweetforgeError> {
        let request = CompletionRequest {
            model: role.model.model.clone(),
            system: Some(system.into()),
            messages: vec![Message::user(prompt)],
            max_tokens: Some(STEP_MAX_TOKENS),
            temperature: Some(role.temperature),
        };

        let completion = self.provider.complete(request).await?;
        session.usage.add(&completion.usage);

        let content = completion.content.trim();
        if content.is_empty() {
            return Err(TweetforgeError::Generation(
                "model returned empty output".into(),
            ));
        }
        Ok(content.to_string())
    }
}
