// src/provider/anthropic.rs — Anthropic Messages API provider
//
// Structured completion is implemented as a forced tool call: the schema
// becomes the tool's input_schema and `tool_choice` pins the model to it,
// so the returned tool_use input is guaranteed to be a JSON object.

use async_trait::async_trait;

use super::{Completion, CompletionRequest, ModelProvider, Role, TokenUsage};
use crate::infra::errors::TweetforgeError;

const STRUCTURED_TOOL_NAME: &str = "submit_result";

pub struct AnthropicProvider {
    api_key: String,
    client: reqwest::Client,
}

impl AnthropicProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self) -> &str {
        "https://api.anthropic.com/v1/messages"
    }

    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let messages: Vec<serde_json::Value> = request
            .messages
            .iter()
            .map(|m| {
                serde_json::json!({
                    "role": match m.role {
                        Role::User => "user",
                        Role::Assistant => "assistant",
                    },
                    "content": m.content,
                })
            })
            .collect();

        let mut body = serde_json::json!({
            "model": request.model,
            "messages": messages,
            "max_tokens": request.max_tokens.unwrap_or(1024),
        });

        if let Some(system) = &request.system {
            body["system"] = serde_json::json!(system);
        }

        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }

        body
    }

    async fn send(&self, body: serde_json::Value) -> Result<serde_json::Value, TweetforgeError> {
        let response = self
            .client
            .post(self.api_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| TweetforgeError::Provider {
                provider: "anthropic".into(),
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
                provider: "anthropic".into(),
                retry_after_ms: retry_after * 1000,
            });
        }

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(TweetforgeError::Provider {
                provider: "anthropic".into(),
                message: format!("HTTP {}: {}", status, error_body),
                retriable: status.is_server_error(),
            });
        }

        response.json().await.map_err(|e| TweetforgeError::Provider {
            provider: "anthropic".into(),
            message: format!("Failed to parse response: {}", e),
            retriable: false,
        })
    }

    fn extract_usage(resp: &serde_json::Value) -> TokenUsage {
        TokenUsage {
            input_tokens: resp["usage"]["input_tokens"].as_u64().unwrap_or(0) as u32,
            output_tokens: resp["usage"]["output_tokens"].as_u64().unwrap_or(0) as u32,
        }
    }
}

#[async_trait]
impl ModelProvider for AnthropicProvider {
    fn id(&self) -> &str {
        "anthropic"
    }

    fn name(&self) -> &str {
        "Anthropic"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, TweetforgeError> {
        let body = self.build_request_body(&request);
        let resp = self.send(body).await?;

        let content = resp["content"]
            .as_array()
            .unwrap_or(&vec![])
            .iter()
            .filter(|c| c["type"] == "text")
            .map(|c| c["text"].as_str().unwrap_or(""))
            .collect::<Vec<_>>()
            .join("");

        Ok(Completion {
            content,
            usage: Self::extract_usage(&resp),
        })
    }

    async fn complete_structured(
        &self,
        request: CompletionRequest,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value, TweetforgeError> {
        let mut body = self.build_request_body(&request);
        body["tools"] = serde_json::json!([{
            "name": STRUCTURED_TOOL_NAME,
            "description": "Submit the result in the required structure.",
            "input_schema": schema,
        }]);
        body["tool_choice"] = serde_json::json!({
            "type": "tool",
            "name": STRUCTURED_TOOL_NAME,
        });

        let resp = self.send(body).await?;

        let usage = Self::extract_usage(&resp);
        tracing::debug!(
            provider = "anthropic",
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "structured completion returned",
        );

        resp["content"]
            .as_array()
            .unwrap_or(&vec![])
            .iter()
            .find(|c| c["type"] == "tool_use" && c["name"] == STRUCTURED_TOOL_NAME)
            .map(|c| c["input"].clone())
            .ok_or_else(|| {
                TweetforgeError::SchemaViolation(
                    "model did not return the forced tool call".into(),
                )
            })
    }
}
