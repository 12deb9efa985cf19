use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_decision_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loan_screening::config::AppConfig;
use loan_screening::error::AppError;
use loan_screening::model::load_classifier;
use loan_screening::screening::PredictionPipeline;
use loan_screening::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(model_path) = args.model_path.take() {
        config.model.artifact_path = model_path;
    }

    telemetry::init(&config.telemetry)?;

    // Load once, before the listener binds. A missing or corrupt artifact
    // is terminal: there is nothing to serve without a model.
    let classifier = load_classifier(&config.model.artifact_path)?;
    let pipeline = Arc::new(PredictionPipeline::new(Arc::new(classifier)));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_decision_routes(pipeline)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "loan screening service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
