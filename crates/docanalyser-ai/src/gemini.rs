//! Gemini `generateContent` backend.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::backend::{AnalysisBackend, BackendError, BackendReply};
use crate::prompt::SYSTEM_INSTRUCTION;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Like `https://generativelanguage.googleapis.com/v1beta` (no trailing slash needed).
    pub api_base: String,
    pub model: String,
    /// Checked on first use, not at construction.
    pub api_key: Option<String>,
    /// Upper bound on a whole generate call.
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(120),
        }
    }
}

/// HTTP client for a single Gemini model.
pub struct GeminiBackend {
    client: reqwest::Client,
    api_base: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

impl GeminiBackend {
    pub fn new(config: GeminiConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model,
            api_key: config.api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl AnalysisBackend for GeminiBackend {
    fn name(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, prompt: &str) -> Result<BackendReply, BackendError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(BackendError::MissingCredential)?;

        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: [Part {
                    text: SYSTEM_INSTRUCTION,
                }],
            },
            contents: [Content {
                role: Some("user"),
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig { temperature: 0.0 },
        };

        info!(model = %self.model, prompt_chars = prompt.chars().count(), "calling gemini");
        // Key goes in a header so it never appears in a logged or returned URL.
        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let raw: Value = resp.json().await?;
        let reply = reply_from_response(raw)?;
        info!(model = %self.model, "gemini reply received");
        Ok(reply)
    }
}

/// Concatenate the first candidate's text parts. A body with no text (a
/// blocked prompt, an empty candidate) is an error carrying Gemini's reason.
fn reply_from_response(raw: Value) -> Result<BackendReply, BackendError> {
    let text: String = raw
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if !text.is_empty() {
        return Ok(BackendReply::Text(text));
    }
    let reason = raw
        .pointer("/promptFeedback/blockReason")
        .or_else(|| raw.pointer("/candidates/0/finishReason"))
        .and_then(Value::as_str)
        .unwrap_or("no candidates");
    Err(BackendError::NoText {
        reason: reason.to_string(),
    })
}
