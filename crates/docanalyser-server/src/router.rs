//! Router assembly and serving.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use docanalyser_ai::AnalysisBackend;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analysis::Analyser;
use crate::handlers::{analyse_document, health_check};
use crate::shutdown::shutdown_signal;

/// Shared handler state. Cloned per request; the analyser itself is stateless.
#[derive(Clone)]
pub struct AppState {
    pub(crate) analyser: Arc<Analyser>,
}

impl AppState {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            analyser: Arc::new(Analyser::new(backend)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/docanalyser", post(analyse_document))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve until SIGINT or SIGTERM, then drain in-flight requests.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    info!(addr = %listener.local_addr()?, "docanalyser listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorBody;
    use crate::handlers::HealthStatus;
    use crate::testing::{BlockedBackend, FailingBackend, ScriptedBackend};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use docanalyser_core::AnalysisResult;
    use serde::de::DeserializeOwned;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app(backend: impl AnalysisBackend + 'static) -> Router {
        router(AppState::new(Arc::new(backend)))
    }

    fn analyse_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/docanalyser")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json<T: DeserializeOwned>(resp: axum::response::Response) -> T {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn doc() -> Value {
        json!({
            "docid": "d1",
            "email": "a@b.com",
            "text": "This rental agreement is made between Acme Properties and Jane Doe."
        })
    }

    #[tokio::test]
    async fn analyse_returns_full_record() {
        let reply = format!(
            "```json\n{}\n```",
            json!({
                "analysis_summary": {
                    "document_type": "Rental Agreement",
                    "parties_involved": ["Acme Properties", "Jane Doe"],
                    "overall_risk_level": "HIGH",
                    "complexity_score": 4,
                    "summary": "Tenant pays all repairs.",
                    "total_clauses_analyzed": 9
                },
                "risks_identified": [{
                    "risk_type": "financial",
                    "description": "Uncapped repairs",
                    "likelihood": "HIGH",
                    "severity": "HIGH",
                    "mitigation": "Negotiate a cap"
                }],
                "confidence_score": 0.75
            })
        );

        let resp = app(ScriptedBackend::new(reply))
            .oneshot(analyse_request(doc()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let result: AnalysisResult = read_json(resp).await;
        assert_eq!(result.docid, "d1");
        assert_eq!(result.email, "a@b.com");
        assert_eq!(result.analysis_summary.parties_involved.len(), 2);
        assert_eq!(result.risks_identified[0].mitigation, "Negotiate a cap");
        assert_eq!(result.confidence_score.get(), 0.75);
    }

    #[tokio::test]
    async fn unparseable_reply_still_succeeds() {
        let resp = app(ScriptedBackend::new("Sorry, I could not analyse this policy."))
            .oneshot(analyse_request(doc()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = read_json(resp).await;
        assert_eq!(body["analysis_summary"]["document_type"], "Insurance Policy");
        assert_eq!(body["analysis_summary"]["overall_risk_level"], "MEDIUM");
        assert_eq!(body["analysis_summary"]["complexity_score"], 5);
        assert_eq!(body["confidence_score"], 0.5);
        assert_eq!(body["hidden_clauses"], json!([]));
    }

    #[tokio::test]
    async fn backend_failure_is_500() {
        let resp = app(FailingBackend)
            .oneshot(analyse_request(doc()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorBody = read_json(resp).await;
        assert!(body.detail.contains("Analysis failed"));
        assert!(body.detail.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn blocked_prompt_is_500_not_defaults() {
        let resp = app(BlockedBackend)
            .oneshot(analyse_request(doc()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorBody = read_json(resp).await;
        assert_eq!(body.detail, "Analysis failed: backend returned no text: SAFETY");
    }

    #[tokio::test]
    async fn schema_violation_is_500() {
        let reply = json!({"confidence_score": 1.1}).to_string();
        let resp = app(ScriptedBackend::new(reply))
            .oneshot(analyse_request(doc()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorBody = read_json(resp).await;
        assert!(body.detail.starts_with("Analysis failed: response model creation failed"));
        assert!(body.detail.contains("confidence_score"));
    }

    #[tokio::test]
    async fn missing_request_field_is_rejected() {
        let resp = app(ScriptedBackend::new("{}"))
            .oneshot(analyse_request(json!({"docid": "d1", "email": "a@b.com"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let resp = app(FailingBackend)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let health: HealthStatus = read_json(resp).await;
        assert_eq!(health.status, "healthy");
        assert!(health.timestamp.ends_with('Z'));
    }
}
