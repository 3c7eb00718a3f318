//! API Layer
//!
//! HTTP handlers that bridge the annotator's client to the session. The
//! session is a single-annotator resource, so handlers serialize on it.

mod error;

pub use error::ApiError;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Label;
use crate::session::{PageView, SubmitOutcome};
use crate::AppState;

/// Build the axum router with mounted endpoints
///
/// Routes:
/// - GET  /api/v1/pages/{n}        - Navigate to page n and render it
/// - POST /api/v1/pages/{n}/labels - Submit the whole page's labels
/// - GET  /api/v1/progress         - Labeling progress totals
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/pages/{n}", get(get_page))
        .route("/api/v1/pages/{n}/labels", post(submit_page))
        .route("/api/v1/progress", get(get_progress))
        .with_state(state)
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct LabelSelection {
    key: String,
    label: Label,
}

#[derive(Debug, Deserialize)]
struct SubmitPageRequest {
    labels: Vec<LabelSelection>,
}

#[derive(Debug, Serialize)]
struct ProgressResponse {
    dataset_size: usize,
    total_labeled: usize,
    page_count: usize,
    prior_labels_available: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/pages/{n}
async fn get_page(
    State(state): State<Arc<AppState>>,
    Path(n): Path<usize>,
) -> Result<Json<PageView>, ApiError> {
    let mut session = state.session.lock().await;
    session.goto_page(n)?;
    debug!(page = n, "rendering page");
    Ok(Json(session.page_view().await))
}

/// POST /api/v1/pages/{n}/labels
///
/// Stages the submitted selections on page `n` and persists the page as one
/// batch. All-or-nothing: a failed write leaves the store untouched and the
/// staged selections in place for a retry.
async fn submit_page(
    State(state): State<Arc<AppState>>,
    Path(n): Path<usize>,
    Json(req): Json<SubmitPageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut session = state.session.lock().await;
    session.goto_page(n)?;
    session.stage_many(req.labels.into_iter().map(|s| (s.key, s.label)))?;

    let outcome: SubmitOutcome = session.submit().await?;
    debug!(page = n, saved = outcome.saved, "page submitted");
    Ok(Json(outcome))
}

/// GET /api/v1/progress
async fn get_progress(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let session = state.session.lock().await;
    let view = session.page_view().await;
    Ok(Json(ProgressResponse {
        dataset_size: session.dataset_size(),
        total_labeled: view.total_labeled,
        page_count: session.page_count(),
        prior_labels_available: view.prior_labels_available,
    }))
}
