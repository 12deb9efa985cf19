use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::Extension;
use axum::Json;
use loan_screening::model::Classifier;
use loan_screening::screening::{decision_router, PredictionPipeline};
use serde_json::json;
use std::sync::Arc;

/// Decision endpoint plus the embedded form page and operational routes.
pub(crate) fn with_decision_routes<C>(pipeline: Arc<PredictionPipeline<C>>) -> axum::Router
where
    C: Classifier + 'static,
{
    decision_router(pipeline)
        .route("/", axum::routing::get(form_page))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

/// The single-page form, served with the widget defaults baked in.
pub(crate) async fn form_page() -> Html<&'static str> {
    Html(include_str!("../assets/form.html"))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use loan_screening::model::{GradientBoostedClassifier, ModelArtifact, TreeNode};
    use loan_screening::screening::domain::FEATURE_NAMES;
    use serde_json::Value;
    use tower::ServiceExt;

    fn tiny_classifier() -> GradientBoostedClassifier {
        GradientBoostedClassifier::new(ModelArtifact {
            format_version: 1,
            feature_names: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
            base_score: 0.0,
            threshold: 0.5,
            trees: vec![TreeNode::Split {
                feature: 13,
                threshold: 650.0,
                left: Box::new(TreeNode::Leaf { value: -1.0 }),
                right: Box::new(TreeNode::Leaf { value: 1.0 }),
            }],
        })
        .expect("valid artifact")
    }

    fn build_router() -> axum::Router {
        with_decision_routes(Arc::new(PredictionPipeline::new(Arc::new(
            tiny_classifier(),
        ))))
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let response = build_router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn form_page_carries_all_fifteen_widgets() {
        let response = build_router()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let page = String::from_utf8(body.to_vec()).expect("utf-8 page");

        for name in FEATURE_NAMES {
            assert!(page.contains(name), "form page is missing {name}");
        }
    }

    #[tokio::test]
    async fn decision_endpoint_renders_a_verdict() {
        let payload = serde_json::json!({ "credit_score": 720.0 });
        let response = build_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/loans/decision")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&payload).expect("serialize"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let verdict: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(
            verdict.get("verdict").and_then(Value::as_str),
            Some("approved"),
        );
    }
}
