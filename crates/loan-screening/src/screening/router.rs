use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use super::form::LoanApplicationForm;
use super::pipeline::{LoanVerdict, PredictionPipeline};
use crate::model::Classifier;

/// Wire payload for a rendered verdict.
#[derive(Debug, Serialize)]
pub struct LoanVerdictView {
    pub verdict: &'static str,
    pub confidence: f64,
    pub confidence_percent: String,
    pub advisory: &'static str,
}

impl From<&LoanVerdict> for LoanVerdictView {
    fn from(verdict: &LoanVerdict) -> Self {
        Self {
            verdict: verdict.outcome.label(),
            confidence: verdict.confidence,
            confidence_percent: verdict.confidence_percent(),
            advisory: verdict.advisory(),
        }
    }
}

/// Router builder exposing the decision endpoint over a shared pipeline.
pub fn decision_router<C>(pipeline: Arc<PredictionPipeline<C>>) -> Router
where
    C: Classifier + 'static,
{
    Router::new()
        .route("/api/v1/loans/decision", post(decision_handler::<C>))
        .with_state(pipeline)
}

pub(crate) async fn decision_handler<C>(
    State(pipeline): State<Arc<PredictionPipeline<C>>>,
    axum::Json(form): axum::Json<LoanApplicationForm>,
) -> Response
where
    C: Classifier + 'static,
{
    let record = form.into_record();
    match pipeline.submit(&record) {
        Ok(verdict) => {
            (StatusCode::OK, axum::Json(LoanVerdictView::from(&verdict))).into_response()
        }
        Err(error) => {
            // Recoverable: only this submission aborts, the form stays live.
            warn!(%error, "prediction aborted");
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
