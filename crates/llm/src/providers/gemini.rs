use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::provider::{LlmError, LlmProvider, Message, Role};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Build the request body for the Gemini generateContent API.
    fn build_request_body(
        messages: &[Message],
        temperature: f32,
        max_tokens: u32,
        schema: Option<&serde_json::Value>,
    ) -> serde_json::Value {
        // Gemini uses a separate system_instruction field
        let system_msg = messages
            .iter()
            .find(|m| matches!(m.role, Role::System))
            .map(|m| m.content.clone());

        let contents: Vec<serde_json::Value> = messages
            .iter()
            .filter(|m| !matches!(m.role, Role::System))
            .map(|m| {
                json!({
                    "role": match m.role {
                        Role::User => "user",
                        Role::Assistant => "model",
                        Role::System => unreachable!(),
                    },
                    "parts": [{ "text": m.content }],
                })
            })
            .collect();

        let mut body = json!({
            "contents": contents,
            "generationConfig": {
                "temperature": temperature,
                "maxOutputTokens": max_tokens,
            },
        });

        if let Some(system) = system_msg {
            body["system_instruction"] = json!({
                "parts": [{ "text": system }],
            });
        }

        if let Some(schema) = schema {
            body["generationConfig"]["responseMimeType"] = json!("application/json");
            body["generationConfig"]["responseSchema"] = schema.clone();
        }

        body
    }

    async fn generate(&self, body: serde_json::Value) -> Result<String, LlmError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model,
        );

        debug!("Gemini request to model={}", self.model);

        // Key goes in a header so it never ends up in error messages that quote the URL.
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            if is_invalid_credential(status, &body) {
                return Err(LlmError::InvalidCredentials(body));
            }
            return Err(LlmError::ApiError { status, body });
        }

        let resp: serde_json::Value = response.json().await?;
        extract_text(&resp)
    }
}

/// Gemini reports a bad key as 400 `API_KEY_INVALID`; 401/403 cover revoked or unauthorised keys.
fn is_invalid_credential(status: u16, body: &str) -> bool {
    status == 401
        || status == 403
        || body.contains("API key not valid")
        || body.contains("API_KEY_INVALID")
}

fn extract_text(resp: &serde_json::Value) -> Result<String, LlmError> {
    let parts = resp["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or(LlmError::EmptyResponse)?;

    let text: String = parts
        .iter()
        .filter_map(|p| p["text"].as_str())
        .collect();

    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(text)
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn complete(
        &self,
        messages: Vec<Message>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let body = Self::build_request_body(&messages, temperature, max_tokens, None);
        self.generate(body).await
    }

    async fn complete_structured(
        &self,
        messages: Vec<Message>,
        temperature: f32,
        max_tokens: u32,
        schema: &serde_json::Value,
    ) -> Result<String, LlmError> {
        let body = Self::build_request_body(&messages, temperature, max_tokens, Some(schema));
        self.generate(body).await
    }
}
