use axum::Json;
use serde_json::{json, Value};

/// The industry names accepted by `POST /api/extract`.
pub async fn list_industries() -> Json<Value> {
    Json(json!({
        "success": true,
        "industries": leadgen::industries::industry_names(),
    }))
}
