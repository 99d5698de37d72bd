use axum::extract::Path;
use axum::{Extension, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::jobs::JobStatus;
use crate::server::{ApiError, AppState};

/// Current state of a job. Polled by clients until a terminal state
/// appears; completed jobs add result counts, failed jobs add the error.
pub async fn job_status(
    Extension(state): Extension<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let job = state.tracker.get_status(job_id).await?;

    let mut body = json!({
        "success": true,
        "job_id": job.id,
        "status": job.status,
        "progress": job.progress,
        "created_at": job.created_at,
    });
    if let Some(completed_at) = job.completed_at {
        body["completed_at"] = json!(completed_at);
    }
    if job.status == JobStatus::Completed {
        body["results_count"] = json!(job.leads.len());
        body["stats"] = json!(job.stats);
    }
    if let Some(error) = &job.error_message {
        body["error_message"] = json!(error);
    }

    Ok(Json(body))
}
