//! Contract between the analyser and whatever model produces the analysis.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// What a backend handed back for a prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendReply {
    /// The generated text itself.
    Text(String),
    /// A structured wrapper; the generated text, if any, sits in one of the
    /// accessor slots probed by [`crate::normalizer::extract_text`].
    Json(Value),
}

impl From<String> for BackendReply {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for BackendReply {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Value> for BackendReply {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("backend credential is not configured")]
    MissingCredential,

    #[cfg(feature = "gemini")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Server { status: u16, body: String },

    /// A successful response that carries no generated text, such as a
    /// prompt blocked by a safety filter.
    #[error("backend returned no text: {reason}")]
    NoText { reason: String },

    #[error("{0}")]
    Other(String),
}

/// A generative model that turns a prompt into a reply.
///
/// Implementations must be stateless across calls; one analysis request makes
/// exactly one `invoke` call.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    async fn invoke(&self, prompt: &str) -> Result<BackendReply, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reply_conversions() {
        assert_eq!(BackendReply::from("hi"), BackendReply::Text("hi".into()));
        assert_eq!(
            BackendReply::from(json!({"content": "hi"})),
            BackendReply::Json(json!({"content": "hi"}))
        );
    }

    #[test]
    fn server_error_message() {
        let err = BackendError::Server {
            status: 429,
            body: "quota exceeded".into(),
        };
        assert_eq!(err.to_string(), "backend returned 429: quota exceeded");
    }

    #[test]
    fn no_text_message_names_reason() {
        let err = BackendError::NoText {
            reason: "SAFETY".into(),
        };
        assert_eq!(err.to_string(), "backend returned no text: SAFETY");
    }
}
