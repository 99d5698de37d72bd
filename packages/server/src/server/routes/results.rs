use axum::extract::Path;
use axum::{Extension, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::server::{ApiError, AppState};

/// Full results of a completed job. Not available until the job completes;
/// failed jobs surface their error through the status endpoint instead.
pub async fn job_results(
    Extension(state): Extension<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let job = state.tracker.get_results(job_id).await?;

    Ok(Json(json!({
        "success": true,
        "job_id": job.id,
        "count": job.leads.len(),
        "results": job.leads,
        "stats": job.stats,
    })))
}
