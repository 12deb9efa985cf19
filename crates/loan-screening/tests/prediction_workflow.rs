//! End-to-end scenarios for the prediction request pipeline: artifact on
//! disk, loader, typed record, classifier call, verdict mapping, and the
//! HTTP decision endpoint.

mod common {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};

    use serde_json::{json, Value};

    /// A small but non-trivial ensemble over the training schema. With the
    /// form defaults (previous defaults on file, credit 600) the margin sums
    /// to -1.3, a clear rejection.
    pub(super) fn sample_artifact() -> Value {
        json!({
            "format_version": 1,
            "feature_names": [
                "person_age",
                "person_income",
                "person_home_ownership",
                "person_emp_length",
                "person_emp_exp",
                "person_education",
                "person_gender",
                "loan_amnt",
                "loan_int_rate",
                "loan_percent_income",
                "loan_intent",
                "cb_person_default_on_file",
                "previous_loan_defaults_on_file",
                "credit_score",
                "cb_person_cred_hist_length"
            ],
            "base_score": 0.0,
            "threshold": 0.5,
            "trees": [
                {
                    "kind": "split", "feature": 12, "threshold": 0.5,
                    "left": { "kind": "leaf", "value": -1.6 },
                    "right": { "kind": "leaf", "value": 0.9 }
                },
                {
                    "kind": "split", "feature": 13, "threshold": 640.0,
                    "left": { "kind": "leaf", "value": -0.7 },
                    "right": {
                        "kind": "split", "feature": 13, "threshold": 720.0,
                        "left": { "kind": "leaf", "value": 0.4 },
                        "right": { "kind": "leaf", "value": 1.1 }
                    }
                },
                {
                    "kind": "split", "feature": 9, "threshold": 35.0,
                    "left": { "kind": "leaf", "value": 0.5 },
                    "right": { "kind": "leaf", "value": -0.9 }
                },
                {
                    "kind": "split", "feature": 8, "threshold": 15.0,
                    "left": { "kind": "leaf", "value": 0.3 },
                    "right": { "kind": "leaf", "value": -0.5 }
                },
                {
                    "kind": "split", "feature": 1, "threshold": 2000.0,
                    "left": { "kind": "leaf", "value": -0.4 },
                    "right": { "kind": "leaf", "value": 0.2 }
                }
            ]
        })
    }

    pub(super) fn write_artifact(document: &Value) -> PathBuf {
        static SEQUENCE: AtomicU64 = AtomicU64::new(0);
        let path = std::env::temp_dir().join(format!(
            "loan-screening-workflow-{}-{}.json",
            std::process::id(),
            SEQUENCE.fetch_add(1, Ordering::Relaxed),
        ));
        std::fs::write(&path, serde_json::to_vec(document).expect("serializes"))
            .expect("artifact file writes");
        path
    }
}

mod startup {
    use super::common::*;
    use loan_screening::model::{load_classifier, ArtifactError, ModelError};

    #[test]
    fn missing_artifact_halts_before_any_submission() {
        let path = std::env::temp_dir().join("loan-screening-missing-artifact.json");

        let error = load_classifier(&path).expect_err("startup must fail");
        assert!(matches!(error, ModelError::ArtifactNotFound { .. }));
    }

    #[test]
    fn corrupt_artifact_halts_with_the_underlying_cause() {
        let path = write_artifact(&serde_json::json!({ "weights": [1, 2, 3] }));

        let error = load_classifier(&path).expect_err("startup must fail");
        assert!(matches!(
            error,
            ModelError::ArtifactLoad {
                source: ArtifactError::Format(_),
                ..
            }
        ));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn valid_artifact_loads_once_and_serves_predictions() {
        let path = write_artifact(&sample_artifact());

        let classifier = load_classifier(&path).expect("startup succeeds");
        assert_eq!(classifier.tree_count(), 5);
        // The handle has to be debug-printable for Result combinators.
        assert!(format!("{classifier:?}").contains("GradientBoostedClassifier"));
        std::fs::remove_file(&path).ok();
    }
}

mod submissions {
    use super::common::*;
    use loan_screening::model::load_classifier;
    use loan_screening::screening::{
        LoanApplicationForm, PredictionPipeline, SubmissionPhase, VerdictOutcome,
    };
    use loan_screening::screening::FormSession;
    use std::sync::Arc;

    fn pipeline() -> PredictionPipeline<loan_screening::model::GradientBoostedClassifier> {
        let path = write_artifact(&sample_artifact());
        let classifier = load_classifier(&path).expect("startup succeeds");
        std::fs::remove_file(&path).ok();
        PredictionPipeline::new(Arc::new(classifier))
    }

    #[test]
    fn default_form_produces_exactly_one_verdict() {
        let pipeline = pipeline();
        let record = LoanApplicationForm::default().into_record();

        let verdict = pipeline.submit(&record).expect("submission succeeds");

        // Margin -1.3 => positive probability ~0.2142, rejected.
        assert_eq!(verdict.outcome, VerdictOutcome::Rejected);
        assert!((0.0..=1.0).contains(&verdict.confidence));
        assert!(verdict.confidence > 0.5);
    }

    #[test]
    fn repeated_submission_yields_the_same_verdict() {
        let pipeline = pipeline();
        let record = LoanApplicationForm::default().into_record();

        let first = pipeline.submit(&record).expect("first");
        let second = pipeline.submit(&record).expect("second");

        assert_eq!(first, second);
    }

    #[test]
    fn a_strong_file_is_approved_with_the_positive_score() {
        let pipeline = pipeline();
        let form = LoanApplicationForm {
            credit_score: 760.0,
            loan_percent_income: 20.0,
            loan_int_rate: 8.0,
            previous_loan_defaults_on_file:
                loan_screening::screening::domain::DefaultHistory::No,
            ..LoanApplicationForm::default()
        };

        let verdict = pipeline
            .submit(&form.into_record())
            .expect("submission succeeds");

        // Margin 0.9 + 1.1 + 0.5 + 0.3 + 0.2 = 3.0 => ~0.9526 approved.
        assert_eq!(verdict.outcome, VerdictOutcome::Approved);
        assert!(verdict.confidence > 0.9);
        assert_eq!(verdict.confidence_percent().len(), 6);
    }

    #[test]
    fn session_walks_idle_computing_rendered() {
        let mut session = FormSession::new(pipeline());
        assert_eq!(session.phase(), SubmissionPhase::Idle);

        session.submit().expect("submission succeeds");
        assert_eq!(session.phase(), SubmissionPhase::Rendered);

        // Editing and resubmitting runs the whole pipeline again.
        session.edit(LoanApplicationForm {
            credit_score: 760.0,
            ..LoanApplicationForm::default()
        });
        session.submit().expect("resubmission succeeds");
        assert_eq!(session.phase(), SubmissionPhase::Rendered);
    }
}

mod http {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use loan_screening::model::load_classifier;
    use loan_screening::screening::{decision_router, PredictionPipeline};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn build_router() -> axum::Router {
        let path = write_artifact(&sample_artifact());
        let classifier = load_classifier(&path).expect("startup succeeds");
        std::fs::remove_file(&path).ok();
        decision_router(Arc::new(PredictionPipeline::new(Arc::new(classifier))))
    }

    fn decision_request(payload: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/loans/decision")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(payload).expect("serialize")))
            .expect("request")
    }

    #[tokio::test]
    async fn post_decision_returns_a_rendered_verdict() {
        let router = build_router();

        let response = router
            .clone()
            .oneshot(decision_request(&json!({})))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(
            payload.get("verdict").and_then(Value::as_str),
            Some("rejected"),
        );
        let confidence = payload
            .get("confidence")
            .and_then(Value::as_f64)
            .expect("confidence present");
        assert!((0.0..=1.0).contains(&confidence));
        let percent = payload
            .get("confidence_percent")
            .and_then(Value::as_str)
            .expect("percent present");
        assert!(percent.ends_with('%'));
        assert!(payload.get("advisory").is_some());
    }

    #[tokio::test]
    async fn unknown_category_is_rejected_by_the_selector_contract() {
        let router = build_router();

        let response = router
            .clone()
            .oneshot(decision_request(&json!({ "loan_intent": "YACHT" })))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn out_of_range_sliders_clamp_instead_of_failing() {
        let router = build_router();

        let response = router
            .clone()
            .oneshot(decision_request(&json!({
                "person_age": 500,
                "loan_int_rate": 99.0,
                "loan_percent_income": -40.0,
            })))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
