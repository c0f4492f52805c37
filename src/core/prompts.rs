// src/core/prompts.rs — Prompt construction for the three loop stages
//
// Format constraints (length, tone, emojis, hashtags) are expressed to the
// model as instructions, not mechanically enforced here.

pub const GENERATOR_SYSTEM: &str = "You are a funny and clever Twitter/X influencer who \
creates viral, original tweets with emojis and hashtags.";

pub const EVALUATOR_SYSTEM: &str = "You are a ruthless, no-laugh-given Twitter critic. \
You evaluate tweets based on humor, originality, virality, and format.";

pub const REVISER_SYSTEM: &str = "You are an expert at punching up tweets for maximum \
virality and humor.";

/// Prompt for the initial generation from a topic.
pub fn generation_prompt(topic: &str) -> String {
    format!(
        "Write a short, original, and hilarious tweet about: \"{topic}\"\n\n\
         Requirements:\n\
         - Do NOT use question-answer format or colon structures (like \"Me:\" or \"Person:\")\n\
         - Maximum 280 characters\n\
         - Use observational humor, irony, sarcasm, or cultural references\n\
         - Think in meme logic, punchlines, or relatable takes\n\
         - Use simple, day-to-day conversational English\n\
         - Add 1-2 relevant emojis naturally within the tweet\n\
         - Include 1-3 relevant hashtags at the end\n\
         - Make it scroll-stopping and memorable\n\n\
         Create something that would genuinely make people laugh and want to retweet. \
         Keep it natural and conversational!"
    )
}

/// Prompt for evaluating a candidate. The verdict schema is attached by the
/// provider's structured-completion path.
pub fn evaluation_prompt(tweet: &str) -> String {
    format!(
        "Evaluate this tweet: \"{tweet}\"\n\n\
         Criteria:\n\
         - Originality: fresh or overused?\n\
         - Humor: actually funny or trying too hard?\n\
         - Punchiness: short, sharp, scroll-stopping?\n\
         - Virality: would people retweet this?\n\
         - Format: natural tweet with emojis and hashtags?\n\n\
         Auto-reject if:\n\
         - Question-answer format\n\
         - Colon structures (like \"Me:\" or \"Person:\")\n\
         - Over 280 characters\n\
         - Traditional setup-punchline joke format\n\
         - Missing emojis or hashtags\n\n\
         Respond with evaluation (\"approved\" or \"needs_improvement\") and brief feedback."
    )
}

/// Prompt for revising a candidate based on the critic's feedback.
pub fn revision_prompt(topic: &str, tweet: &str, feedback: &str) -> String {
    format!(
        "Improve this tweet based on feedback: \"{feedback}\"\n\n\
         Topic: \"{topic}\"\n\
         Original: {tweet}\n\n\
         Instructions:\n\
         - Re-write as a short, viral-worthy tweet\n\
         - Address all feedback issues\n\
         - NO question-answer or colon formats (Me:, Person:, etc.)\n\
         - Under 280 characters\n\
         - Make it funnier, punchier, more original\n\
         - Include natural emojis in the text\n\
         - Add 1-3 relevant hashtags at the end\n\
         - Keep it sharp, relatable, and conversational\n\n\
         Provide ONLY the improved tweet, nothing else."
    )
}

/// JSON schema constraining the critic's output to the two-value verdict
/// plus free-text feedback.
pub fn verdict_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "evaluation": {
                "type": "string",
                "enum": ["approved", "needs_improvement"],
                "description": "Final evaluation result."
            },
            "feedback": {
                "type": "string",
                "description": "Detailed feedback for the tweet."
            }
        },
        "required": ["evaluation", "feedback"],
        "additionalProperties": false
    })
}
