use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::CompletionSettings;
use crate::error::CompletionError;

/// Single-shot text completion backend.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

// ============================================================================
// OpenAI-compatible chat completions (Groq, OpenRouter, local servers)
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Client for any `/chat/completions` endpoint speaking the OpenAI format.
pub struct OpenAiCompatibleClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiCompatibleClient {
    /// Build a client whose every request is bounded by `settings.timeout`.
    pub fn new(settings: &CompletionSettings) -> Result<Self, CompletionError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompatibleClient {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.7,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!("Sending completion request ({} prompt bytes)", prompt.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Completion API returned {status}");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(CompletionError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::{HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Response};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    use super::*;

    async fn serve_mock(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1/")
    }

    fn client(base_url: String, timeout: Duration) -> OpenAiCompatibleClient {
        OpenAiCompatibleClient::new(&CompletionSettings {
            api_key: "test-key".to_string(),
            base_url,
            model: "test-model".to_string(),
            timeout,
        })
        .unwrap()
    }

    async fn client_for(app: Router) -> OpenAiCompatibleClient {
        client(serve_mock(app).await, Duration::from_secs(5))
    }

    fn reply(content: Value) -> Json<Value> {
        Json(json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] }))
    }

    async fn checked_chat(headers: HeaderMap, Json(body): Json<Value>) -> Response {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some("Bearer test-key");
        let temperature = body["temperature"].as_f64().unwrap_or_default();
        let well_formed = body["model"] == "test-model"
            && body["messages"][0]["role"] == "user"
            && body["messages"][0]["content"] == "pick foods"
            && (temperature - 0.7).abs() < 1e-6;

        if !authorized || !well_formed {
            return (StatusCode::BAD_REQUEST, body.to_string()).into_response();
        }
        reply(json!("[1]")).into_response()
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice_content() {
        let app = Router::new().route("/v1/chat/completions", post(checked_chat));
        let content = client_for(app).await.complete("pick foods").await.unwrap();
        assert_eq!(content, "[1]");
    }

    #[tokio::test]
    async fn test_complete_without_content_is_empty_response() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let client = client_for(app).await;
        let err = client.complete("pick foods").await.unwrap_err();
        assert!(matches!(err, CompletionError::EmptyResponse), "got {err:?}");

        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { reply(Value::Null) }),
        );
        let client = client_for(app).await;
        let err = client.complete("pick foods").await.unwrap_err();
        assert!(matches!(err, CompletionError::EmptyResponse), "got {err:?}");

        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { reply(json!("   ")) }),
        );
        let client = client_for(app).await;
        let err = client.complete("pick foods").await.unwrap_err();
        assert!(matches!(err, CompletionError::EmptyResponse), "got {err:?}");
    }

    #[tokio::test]
    async fn test_complete_error_status_keeps_body() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "nope") }),
        );
        let err = client_for(app).await.complete("pick foods").await.unwrap_err();
        match err {
            CompletionError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "nope");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_times_out() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                reply(json!("[1]"))
            }),
        );
        let client = client(serve_mock(app).await, Duration::from_millis(300));
        let err = client.complete("pick foods").await.unwrap_err();
        match err {
            CompletionError::Http(e) => assert!(e.is_timeout(), "got {e}"),
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }
}
