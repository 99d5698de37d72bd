//! Router assembly and shared application state.

use std::sync::Arc;

use axum::http::Method;
use axum::routing::{get, post};
use axum::{Extension, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::jobs::JobTracker;

use super::routes;

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<JobTracker>,
}

impl AppState {
    pub fn new(tracker: Arc<JobTracker>) -> Self {
        Self { tracker }
    }
}

pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/industries", get(routes::industries::list_industries))
        .route("/api/extract", post(routes::extract::start_extraction))
        .route("/api/status/:job_id", get(routes::status::job_status))
        .route("/api/results/:job_id", get(routes::results::job_results))
        .route("/api/download/:job_id", get(routes::download::download_csv))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
