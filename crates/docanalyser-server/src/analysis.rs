//! One analysis request: prompt, single backend call, normalize, build the result.

use std::sync::Arc;
use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use docanalyser_ai::{AnalysisBackend, BackendError, build_analysis_prompt, normalize};
use docanalyser_core::{AnalysisRequest, AnalysisResult, Envelope, ValidationError};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("response model creation failed: {0}")]
    Construction(#[from] ValidationError),
}

/// Runs analyses against an injected backend. Holds no per-request state.
pub struct Analyser {
    backend: Arc<dyn AnalysisBackend>,
}

impl Analyser {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self { backend }
    }

    /// Analyse one document. The backend is called exactly once, without retry.
    pub async fn analyse(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let started = Instant::now();
        info!(
            docid = %request.docid,
            text_chars = request.text.chars().count(),
            backend = self.backend.name(),
            "starting analysis"
        );

        let prompt = build_analysis_prompt(&request.text);
        let reply = self
            .backend
            .invoke(&prompt)
            .await
            .inspect_err(|e| error!(docid = %request.docid, error = %e, "backend call failed"))?;

        let normalized = normalize(&reply);
        let processing_time_seconds = started.elapsed().as_secs_f64();
        info!(
            docid = %request.docid,
            strategy = normalized.strategy.as_str(),
            keys = normalized.fields.len(),
            elapsed_secs = processing_time_seconds,
            "reply normalized"
        );

        let envelope = Envelope {
            docid: request.docid.clone(),
            email: request.email.clone(),
            analysis_timestamp: utc_timestamp(),
            processing_time_seconds,
        };
        let result = AnalysisResult::from_fields(&normalized.fields, envelope).inspect_err(|e| {
            error!(
                docid = %request.docid,
                field = e.field(),
                error = %e,
                "reply does not fit the result schema"
            )
        })?;
        Ok(result)
    }
}

/// Current UTC time as ISO 8601 with microseconds and a `Z` suffix.
pub(crate) fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
