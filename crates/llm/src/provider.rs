use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A chat message for the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Chat completion backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a chat completion request and return the assistant's response text.
    async fn complete(
        &self,
        messages: Vec<Message>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError>;

    /// Like [`complete`](Self::complete), but asks for JSON conforming to `schema`.
    ///
    /// Backends without native structured output just run a plain completion;
    /// callers validate the JSON either way.
    async fn complete_structured(
        &self,
        messages: Vec<Message>,
        temperature: f32,
        max_tokens: u32,
        _schema: &serde_json::Value,
    ) -> Result<String, LlmError> {
        self.complete(messages, temperature, max_tokens).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    ApiError { status: u16, body: String },
    #[error("API key rejected by provider: {0}")]
    InvalidCredentials(String),
    #[error("provider returned no content")]
    EmptyResponse,
    #[error("provider not configured: {0}")]
    NotConfigured(String),
}
