use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::jobs::JobParams;
use crate::server::{ApiError, AppState};

const DEFAULT_MAX_RESULTS: usize = 50;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

/// Accept an extraction request and return the id of the job now running
/// it. Invalid parameters are rejected here and no job is created.
pub async fn start_extraction(
    Extension(state): Extension<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<Value>, ApiError> {
    let job_id = state
        .tracker
        .submit(JobParams {
            location: request.location.trim().to_string(),
            industries: request.industries,
            max_results: request.max_results,
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "job_id": job_id,
        "message": "Extraction started",
    })))
}
