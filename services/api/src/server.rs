use crate::cli::ServeArgs;
use crate::infra::{AppState, TableCache};
use crate::routes::router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use predial::config::AppConfig;
use predial::error::AppError;
use predial::telemetry;
use predial::workflows::predial::AnalysisOptions;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        tables: TableCache::new(config.analysis.table_cache),
        options: AnalysisOptions::from(&config.analysis),
    };

    let app = router(config.analysis.max_upload_bytes)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        top_targets = config.analysis.top_targets,
        table_cache = config.analysis.table_cache,
        max_upload_bytes = config.analysis.max_upload_bytes,
        "predial analytics service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
