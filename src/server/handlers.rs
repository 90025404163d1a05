//! HTTP handlers

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::error::ApiError;
use super::AppState;
use crate::pattern_library::PatternDefinition;
use crate::report::{AnalysisRequest, AnalysisResult};
use crate::result_store::ResultStore;

/// Body of `POST /analyze`; fields are validated after trimming
#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    #[serde(default)]
    pub policy: String,
    #[serde(default)]
    pub source: String,
}

pub async fn health() -> &'static str {
    "OK"
}

/// List the loaded reference patterns
pub async fn list_patterns(State(state): State<Arc<AppState>>) -> Json<Vec<PatternDefinition>> {
    Json(state.pipeline.library().definitions().cloned().collect())
}

/// Analyze a policy, store the result, and return it
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let request = AnalysisRequest::new(&body.policy, &body.source)?;

    // CPU-bound; one blocking worker per request keeps the runtime responsive
    let pipeline = state.pipeline.clone();
    let result = tokio::task::spawn_blocking(move || pipeline.analyze(request))
        .await
        .context("analysis worker failed")?;

    state.store.save(&result).await?;
    tracing::info!(
        id = %result.id,
        source = %result.source,
        matches = result.match_count(),
        "Stored analysis"
    );

    Ok(Json(result))
}

/// Serve a stored result as a JSON attachment
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = ResultStore::parse_id(&id)?;
    let content = state.store.read_raw(id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{id}.json\""),
            ),
        ],
        content,
    ))
}
