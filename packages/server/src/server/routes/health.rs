use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Lead extraction API is running",
        "timestamp": Utc::now(),
    }))
}
