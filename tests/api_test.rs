// tests/api_test.rs — HTTP surface tests with a mock provider

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use tweetforge::api::{build_router, ApiState};
use tweetforge::infra::errors::TweetforgeError;
use tweetforge::provider::roles::ModelRoles;
use tweetforge::provider::{Completion, CompletionRequest, ModelProvider, ModelRef, TokenUsage};

/// Mock provider: numbered drafts, scripted verdict sequence.
struct ScriptedProvider {
    verdicts: Vec<&'static str>,
    evaluations: AtomicU32,
}

impl ScriptedProvider {
    fn new(verdicts: Vec<&'static str>) -> Self {
        Self {
            verdicts,
            evaluations: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    fn id(&self) -> &str {
        "scripted"
    }
    fn name(&self) -> &str {
        "Scripted Provider"
    }
    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<Completion, TweetforgeError> {
        Ok(Completion {
            content: "Coffee: the original productivity hack. #coffee".into(),
            usage: TokenUsage {
                input_tokens: 80,
                output_tokens: 25,
            },
        })
    }
    async fn complete_structured(
        &self,
        _request: CompletionRequest,
        _schema: &serde_json::Value,
    ) -> Result<serde_json::Value, TweetforgeError> {
        let n = self.evaluations.fetch_add(1, Ordering::SeqCst) as usize;
        let verdict = self
            .verdicts
            .get(n)
            .or(self.verdicts.last())
            .copied()
            .unwrap_or("needs_improvement");
        Ok(serde_json::json!({
            "evaluation": verdict,
            "feedback": "solid",
        }))
    }
}

/// Provider whose calls always fail, for the 500 path.
struct FailingProvider;

#[async_trait]
impl ModelProvider for FailingProvider {
    fn id(&self) -> &str {
        "failing"
    }
    fn name(&self) -> &str {
        "Failing"
    }
    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<Completion, TweetforgeError> {
        Err(TweetforgeError::Provider {
            provider: "failing".into(),
            message: "backend unreachable".into(),
            retriable: false,
        })
    }
    async fn complete_structured(
        &self,
        _request: CompletionRequest,
        _schema: &serde_json::Value,
    ) -> Result<serde_json::Value, TweetforgeError> {
        Err(TweetforgeError::Provider {
            provider: "failing".into(),
            message: "backend unreachable".into(),
            retriable: false,
        })
    }
}

fn state_with(provider: Arc<dyn ModelProvider>) -> ApiState {
    ApiState {
        provider,
        roles: ModelRoles::from_single(ModelRef::new("scripted", "scripted-model")),
        default_max_iteration: 3,
    }
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_payload() {
    let app = build_router(state_with(Arc::new(ScriptedProvider::new(vec![
        "approved",
    ]))));
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_generate_tweet_happy_path() {
    let app = build_router(state_with(Arc::new(ScriptedProvider::new(vec![
        "needs_improvement",
        "approved",
    ]))));
    let resp = app
        .oneshot(post_json(
            "/api/generate-tweet",
            serde_json::json!({"topic": "coffee", "max_iteration": 2}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["topic"], "coffee");
    assert_eq!(json["evaluation"], "approved");
    assert_eq!(json["total_iterations"], 1);
    let history = json["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["evaluation"], "needs_improvement");
    assert_eq!(history[1]["evaluation"], "approved");
    assert_eq!(history[0]["iteration"], 1);
    assert!(json["final_tweet"].as_str().unwrap().contains("Coffee"));
}

#[tokio::test]
async fn test_generate_tweet_uses_default_cap() {
    // No max_iteration in the request; the configured default (3) bounds
    // an evaluator that never approves.
    let app = build_router(state_with(Arc::new(ScriptedProvider::new(vec![
        "needs_improvement",
    ]))));
    let resp = app
        .oneshot(post_json(
            "/api/generate-tweet",
            serde_json::json!({"topic": "coffee"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["total_iterations"], 3);
    assert_eq!(json["history"].as_array().unwrap().len(), 4);
    assert_eq!(json["evaluation"], "needs_improvement");
}

#[tokio::test]
async fn test_generate_tweet_validation_errors() {
    for body in [
        serde_json::json!({"topic": ""}),
        serde_json::json!({"topic": "x".repeat(201)}),
        serde_json::json!({"topic": "coffee", "max_iteration": 0}),
        serde_json::json!({"topic": "coffee", "max_iteration": 6}),
    ] {
        let app = build_router(state_with(Arc::new(ScriptedProvider::new(vec![
            "approved",
        ]))));
        let resp = app
            .oneshot(post_json("/api/generate-tweet", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert!(json["error"].is_string());
    }
}

#[tokio::test]
async fn test_generate_tweet_topic_at_limit_accepted() {
    let app = build_router(state_with(Arc::new(ScriptedProvider::new(vec![
        "approved",
    ]))));
    let resp = app
        .oneshot(post_json(
            "/api/generate-tweet",
            serde_json::json!({"topic": "x".repeat(200)}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_generate_tweet_backend_failure_is_500() {
    let app = build_router(state_with(Arc::new(FailingProvider)));
    let resp = app
        .oneshot(post_json(
            "/api/generate-tweet",
            serde_json::json!({"topic": "coffee"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(resp).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("backend unreachable"));
}
