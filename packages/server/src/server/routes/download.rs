use axum::extract::Path;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::Extension;
use uuid::Uuid;

use crate::server::{ApiError, AppState};

/// Completed results as a CSV attachment.
pub async fn download_csv(
    Extension(state): Extension<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let (filename, bytes) = state.tracker.export_csv(job_id).await?;

    let headers = [
        (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes))
}
