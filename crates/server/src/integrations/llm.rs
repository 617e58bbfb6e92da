//! OpenAI-compatible chat completions, used in JSON mode

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("Language model unreachable: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Language model returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Language model answer is not a JSON object: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Sends a system and a user message and returns the JSON object the
    /// model answered with
    async fn complete_json(&self, system: &str, prompt: &str) -> Result<Value, AdvisorError>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: Value,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AnswerMessage,
}

#[derive(Deserialize)]
struct AnswerMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_base: &str, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }
}

/// Extracts the JSON object from the first choice of a chat completion
fn answer_object(response: ChatResponse) -> Result<Value, AdvisorError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| AdvisorError::Malformed("empty completion".to_string()))?;

    match serde_json::from_str::<Value>(&content) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(other) => Err(AdvisorError::Malformed(format!("expected an object, got {other}"))),
        Err(e) => Err(AdvisorError::Malformed(e.to_string())),
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn complete_json(&self, system: &str, prompt: &str) -> Result<Value, AdvisorError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            response_format: serde_json::json!({ "type": "json_object" }),
            temperature: 0.7,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            log::error!("Language model call failed with {status}: {message}");
            return Err(AdvisorError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        answer_object(response.json().await?)
    }
}
