//! HTTP surface over the analysis pipeline and the result store
//!
//! - `GET /health`
//! - `GET /patterns`
//! - `POST /analyze`
//! - `GET /download/:id`

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::pipeline::AnalysisPipeline;
use crate::result_store::ResultStore;

pub mod error;
pub mod handlers;

pub use error::ApiError;

/// Shared, read-only state for all requests
#[derive(Debug)]
pub struct AppState {
    pub pipeline: Arc<AnalysisPipeline>,
    pub store: ResultStore,
}

impl AppState {
    pub fn new(pipeline: AnalysisPipeline, store: ResultStore) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            store,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/patterns", get(handlers::list_patterns))
        .route("/analyze", post(handlers::analyze))
        .route("/download/:id", get(handlers::download))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
