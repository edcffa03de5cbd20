//! Scripted backends for exercising the service without a model.

use std::sync::Mutex;

use async_trait::async_trait;
use docanalyser_ai::{AnalysisBackend, BackendError, BackendReply};

/// Returns the same reply to every prompt and remembers the prompts.
pub struct ScriptedBackend {
    reply: BackendReply,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(reply: impl Into<BackendReply>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn invoke(&self, prompt: &str) -> Result<BackendReply, BackendError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Fails every call.
pub struct FailingBackend;

#[async_trait]
impl AnalysisBackend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    async fn invoke(&self, _prompt: &str) -> Result<BackendReply, BackendError> {
        Err(BackendError::Other("quota exceeded".into()))
    }
}

/// Answers every call like a model whose prompt was blocked.
pub struct BlockedBackend;

#[async_trait]
impl AnalysisBackend for BlockedBackend {
    fn name(&self) -> &str {
        "blocked"
    }

    async fn invoke(&self, _prompt: &str) -> Result<BackendReply, BackendError> {
        Err(BackendError::NoText {
            reason: "SAFETY".into(),
        })
    }
}
