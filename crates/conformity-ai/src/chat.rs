//! Ollama chat client used for free-text suggestions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("chat service returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("unexpected response format from chat service")]
    UnexpectedResponse,
}

/// Decoding parameters forwarded as Ollama `options`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChatOptions {
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub num_predict: u32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            num_predict: 128,
        }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    stream: bool,
    options: ChatOptions,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

/// HTTP client for a local Ollama runtime.
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    options: ChatOptions,
}

impl ChatClient {
    /// Create a client for the Ollama server at `base_url` using `model`.
    ///
    /// `base_url` should be like `http://localhost:11434` (no trailing slash).
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            options: ChatOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `prompt` as a single user turn and return the assistant's reply.
    ///
    /// A reply without a non-empty `message.content` string is reported as
    /// [`ChatError::UnexpectedResponse`].
    pub async fn chat(&self, prompt: &str) -> Result<String, ChatError> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
            options: self.options,
        };

        debug!(url = %url, model = %self.model, "sending chat request");
        let resp = self.client.post(&url).json(&request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChatError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = resp.json().await?;
        let content = body
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
            .filter(|c| !c.trim().is_empty())
            .ok_or(ChatError::UnexpectedResponse)?;

        info!(model = %self.model, chars = content.len(), "generated suggestion");
        Ok(content.to_string())
    }

    /// Names of the models installed on the Ollama server.
    pub async fn list_models(&self) -> Result<Vec<String>, ChatError> {
        let url = format!("{}/api/tags", self.base_url);
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChatError::Server {
                status: status.as_u16(),
                body,
            });
        }
        let tags: TagsResponse = resp.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::get, routing::post};
    use serde_json::json;

    /// Serve `app` on an ephemeral port and return its base URL.
    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Echoes the received request fields back inside `message.content`.
    async fn echo_chat(Json(req): Json<Value>) -> Json<Value> {
        let content = format!(
            "model={} role={} prompt={} stream={} temperature={} num_predict={}",
            req["model"].as_str().unwrap_or_default(),
            req["messages"][0]["role"].as_str().unwrap_or_default(),
            req["messages"][0]["content"].as_str().unwrap_or_default(),
            req["stream"],
            req["options"]["temperature"],
            req["options"]["num_predict"],
        );
        Json(json!({ "model": req["model"], "message": { "role": "assistant", "content": content }, "done": true }))
    }

    #[tokio::test]
    async fn chat_forwards_prompt_and_options() {
        let base = spawn(Router::new().route("/api/chat", post(echo_chat))).await;
        let client = ChatClient::new(format!("{base}/"), "llama3.2:latest");
        let reply = client.chat("Como melhorar a conformidade?").await.unwrap();
        assert!(reply.contains("model=llama3.2:latest"), "{reply}");
        assert!(reply.contains("role=user"), "{reply}");
        assert!(reply.contains("prompt=Como melhorar a conformidade?"), "{reply}");
        assert!(reply.contains("stream=false"), "{reply}");
        assert!(reply.contains("temperature=0.7"), "{reply}");
        assert!(reply.contains("num_predict=128"), "{reply}");
    }

    #[tokio::test]
    async fn chat_custom_options() {
        let base = spawn(Router::new().route("/api/chat", post(echo_chat))).await;
        let client = ChatClient::new(base, "gemma3:1b").with_options(ChatOptions {
            temperature: 0.25,
            num_predict: 64,
        });
        let reply = client.chat("hi").await.unwrap();
        assert!(reply.contains("temperature=0.25"), "{reply}");
        assert!(reply.contains("num_predict=64"), "{reply}");
    }

    #[tokio::test]
    async fn chat_unexpected_shape() {
        let app = Router::new().route(
            "/api/chat",
            post(|| async { Json(json!({ "response": "legacy generate format" })) }),
        );
        let client = ChatClient::new(spawn(app).await, "llama3.2:latest");
        let err = client.chat("hello").await.unwrap_err();
        assert!(matches!(err, ChatError::UnexpectedResponse), "{err:?}");
    }

    #[tokio::test]
    async fn chat_empty_content_is_unexpected() {
        let app = Router::new().route(
            "/api/chat",
            post(|| async { Json(json!({ "message": { "role": "assistant", "content": "" } })) }),
        );
        let client = ChatClient::new(spawn(app).await, "llama3.2:latest");
        assert!(matches!(
            client.chat("hello").await,
            Err(ChatError::UnexpectedResponse)
        ));
    }

    #[tokio::test]
    async fn chat_server_error() {
        let app = Router::new().route(
            "/api/chat",
            post(|| async { (StatusCode::NOT_FOUND, "model 'nope' not found") }),
        );
        let client = ChatClient::new(spawn(app).await, "nope");
        match client.chat("hello").await {
            Err(ChatError::Server { status, body }) => {
                assert_eq!(status, 404);
                assert!(body.contains("not found"));
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn chat_unreachable() {
        // Bind then drop to obtain a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ChatClient::new(format!("http://{addr}"), "llama3.2:latest");
        assert!(matches!(
            client.chat("hello").await,
            Err(ChatError::Http(_))
        ));
    }

    #[tokio::test]
    async fn list_models_names() {
        let app = Router::new().route(
            "/api/tags",
            get(|| async {
                Json(json!({ "models": [{ "name": "llama3.2:latest" }, { "name": "gemma3:1b" }] }))
            }),
        );
        let client = ChatClient::new(spawn(app).await, "llama3.2:latest");
        assert_eq!(
            client.list_models().await.unwrap(),
            vec!["llama3.2:latest".to_string(), "gemma3:1b".to_string()]
        );
    }

    #[test]
    fn trims_trailing_slash() {
        let client = ChatClient::new("http://localhost:11434/", "llama3.2:latest");
        assert_eq!(client.base_url, "http://localhost:11434");
        assert_eq!(client.model(), "llama3.2:latest");
    }
}
