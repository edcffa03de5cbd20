//! Route handlers.

use axum::Json;
use axum::extract::State;
use docanalyser_core::{AnalysisRequest, AnalysisResult};
use serde::{Deserialize, Serialize};

use crate::analysis::utc_timestamp;
use crate::error::ApiError;
use crate::router::AppState;

/// `POST /docanalyser`
pub async fn analyse_document(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let result = state.analyser.analyse(&request).await?;
    Ok(Json(result))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

/// `GET /health`
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: utc_timestamp(),
    })
}
