use crate::infra::{table_id, AppState};
use axum::body::Bytes;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use predial::error::AppError;
use predial::workflows::ingest::PredialImporter;
use predial::workflows::predial::{
    analyze, FilterOptions, FilterSelection, PredialAnalysis, PropertyTable,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Serialize)]
pub(crate) struct TableSummary {
    pub(crate) table_id: String,
    pub(crate) records: usize,
    pub(crate) filter_options: FilterOptions,
}

/// Either a previously uploaded `table_id` or an inline `csv` export.
#[derive(Debug, Deserialize)]
pub(crate) struct AnalysisRequest {
    #[serde(default)]
    pub(crate) table_id: Option<String>,
    #[serde(default)]
    pub(crate) csv: Option<String>,
    #[serde(default)]
    pub(crate) filters: FilterSelection,
}

/// Builds the service routes; request bodies may be up to `max_upload_bytes`.
pub(crate) fn router(max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/predial/tables", post(upload_table_endpoint))
        .route("/api/v1/predial/analysis", post(analysis_endpoint))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
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

pub(crate) async fn upload_table_endpoint(
    Extension(state): Extension<AppState>,
    body: Bytes,
) -> Result<Json<TableSummary>, AppError> {
    let (table_id, table) = ingest(&state, &body)?;

    Ok(Json(TableSummary {
        table_id,
        records: table.len(),
        filter_options: FilterOptions::from_table(&table),
    }))
}

pub(crate) async fn analysis_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AnalysisRequest>,
) -> Result<Json<PredialAnalysis>, AppError> {
    let AnalysisRequest {
        table_id,
        csv,
        filters,
    } = payload;

    let table = match (table_id, csv) {
        (Some(id), None) => state
            .tables
            .get(&id)
            .ok_or(AppError::UnknownTable(id))?,
        (None, Some(csv)) => ingest(&state, csv.as_bytes())?.1,
        (Some(_), Some(_)) => {
            return Err(AppError::InvalidRequest(
                "provide either table_id or csv, not both".to_string(),
            ))
        }
        (None, None) => {
            return Err(AppError::InvalidRequest(
                "table_id or csv is required".to_string(),
            ))
        }
    };

    Ok(Json(analyze(&table, &filters, &state.options)))
}

/// Normalizes an upload unless identical bytes are already cached.
fn ingest(state: &AppState, bytes: &[u8]) -> Result<(String, Arc<PropertyTable>), AppError> {
    let id = table_id(bytes);
    if let Some(table) = state.tables.get(&id) {
        return Ok((id, table));
    }

    let table = PredialImporter::from_reader(bytes)?;
    info!(table_id = %id, records = table.len(), "cached predial upload");
    let table = state.tables.insert(&id, table);
    Ok((id, table))
}
