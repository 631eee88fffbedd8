//! API request handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Local;
use chrono::SecondsFormat;
use tracing::info;

use crate::analysis::AnalysisEngine;
use crate::analysis::AnalysisResult;
use crate::api::error::ApiError;
use crate::api::types::AnalyzeRequest;
use crate::api::types::BatchAnalyzeRequest;
use crate::api::types::BatchAnalyzeResponse;
use crate::api::types::HealthResponse;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AnalysisEngine>,
}

impl AppState {
    pub fn new(engine: Arc<AnalysisEngine>) -> Self {
        Self { engine }
    }
}

/// Health check handler
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
    })
}

/// Full analysis of one text (POST /api/analyze)
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) = payload?;
    let text = request.text.unwrap_or_default();
    info!("POST /api/analyze ({} chars)", text.chars().count());

    let result = state.engine.analyze(&text).await?;
    Ok(Json(result))
}

/// Polarity-only analysis of several texts (POST /api/batch-analyze)
pub async fn batch_analyze(
    State(state): State<AppState>,
    payload: Result<Json<BatchAnalyzeRequest>, JsonRejection>,
) -> Result<Json<BatchAnalyzeResponse>, ApiError> {
    let Json(request) = payload?;
    let texts = request.texts.unwrap_or_default();
    info!("POST /api/batch-analyze ({} texts)", texts.len());

    let results = state.engine.analyze_batch(&texts)?;
    Ok(Json(BatchAnalyzeResponse { results }))
}
