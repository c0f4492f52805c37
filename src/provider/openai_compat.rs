// src/provider/openai_compat.rs — Generic OpenAI-compatible provider
//
// Used for Groq (the default backend) and OpenAI, or any endpoint that
// speaks the chat-completions wire format.
//
// Structured completion uses `response_format: {"type": "json_object"}` and
// embeds the schema in the prompt; the returned JSON text is parsed and
// handed back to the caller for validation.

use async_trait::async_trait;

use super::{Completion, CompletionRequest, ModelProvider, Role, TokenUsage};
use crate::infra::errors::TweetforgeError;

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Provider for any OpenAI-compatible API endpoint.
pub struct OpenAICompatProvider {
    id_str: String,
    name_str: String,
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAICompatProvider {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        api_key: String,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            id_str: id.into(),
            name_str: name.into(),
            api_key,
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn groq(api_key: String) -> Self {
        Self::new("groq", "Groq", api_key, GROQ_BASE_URL)
    }

    pub fn openai(api_key: String) -> Self {
        Self::new("openai", "OpenAI", api_key, OPENAI_BASE_URL)
    }

    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut messages: Vec<serde_json::Value> = Vec::new();

        if let Some(system) = &request.system {
            messages.push(serde_json::json!({
                "role": "system",
                "content": system,
            }));
        }

        for m in &request.messages {
            messages.push(serde_json::json!({
                "role": match m.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                "content": m.content,
            }));
        }

        let mut body = serde_json::json!({
            "model": request.model,
            "messages": messages,
        });

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }

        body
    }

    async fn send(&self, body: serde_json::Value) -> Result<serde_json::Value, TweetforgeError> {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| TweetforgeError::Provider {
                provider: self.id_str.clone(),
                message: e.to_string(),
                retriable: e.is_timeout() || e.is_connect(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5);
            return Err(TweetforgeError::RateLimited {
                provider: self.id_str.clone(),
                retry_after_ms: retry_after * 1000,
            });
        }

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(TweetforgeError::Provider {
                provider: self.id_str.clone(),
                message: format!("HTTP {}: {}", status, error_body),
                retriable: status.is_server_error(),
            });
        }

        response.json().await.map_err(|e| TweetforgeError::Provider {
            provider: self.id_str.clone(),
            message: format!("Failed to parse response: {}", e),
            retriable: false,
        })
    }

    fn extract_completion(&self, resp: &serde_json::Value) -> Completion {
        let content = resp["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string();

        let usage = TokenUsage {
            input_tokens: resp["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32,
            output_tokens: resp["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
        };

        Completion { content, usage }
    }
}

#[async_trait]
impl ModelProvider for OpenAICompatProvider {
    fn id(&self) -> &str {
        &self.id_str
    }

    fn name(&self) -> &str {
        &self.name_str
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, TweetforgeError> {
        let body = self.build_request_body(&request);
        let resp = self.send(body).await?;
        Ok(self.extract_completion(&resp))
    }

    async fn complete_structured(
        &self,
        request: CompletionRequest,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value, TweetforgeError> {
        let mut request = request;

        // json_object mode requires the word "JSON" and the expected shape
        // to appear in the prompt, so append the schema to the last message.
        let schema_note = format!(
            "\n\nRespond with a single JSON object conforming to this JSON schema, \
             with no surrounding text:\n{}",
            schema
        );
        if let Some(last) = request.messages.last_mut() {
            last.content.push_str(&schema_note);
        }

        let mut body = self.build_request_body(&request);
        body["response_format"] = serde_json::json!({ "type": "json_object" });

        let resp = self.send(body).await?;
        let completion = self.extract_completion(&resp);

        tracing::debug!(
            provider = %self.id_str,
            input_tokens = completion.usage.input_tokens,
            output_tokens = completion.usage.output_tokens,
            "structured completion returned",
        );

        serde_json::from_str(completion.content.trim()).map_err(|e| {
            TweetforgeError::SchemaViolation(format!(
                "response is not valid JSON: {} (content: {:.120})",
                e, completion.content
            ))
        })
    }
}
