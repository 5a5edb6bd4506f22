use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::info;

use super::{ApiError, AppState};
use crate::models::JobPosting;

pub type PostingsBySite = BTreeMap<String, Vec<JobPosting>>;

/// GET /jobs
pub async fn list_jobs(State(state): State<AppState>) -> Json<PostingsBySite> {
    let snapshot = state.monitor.snapshot().await;
    Json(snapshot.postings.clone())
}

/// POST /jobs/refresh
/// Runs one full cycle before answering with the updated postings.
pub async fn refresh_jobs(State(state): State<AppState>) -> Result<Json<PostingsBySite>, ApiError> {
    let report = state.monitor.run_cycle().await?;
    info!(changed = report.changed, skipped = report.sites_skipped, "Manual refresh finished");

    let snapshot = state.monitor.snapshot().await;
    Ok(Json(snapshot.postings.clone()))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
