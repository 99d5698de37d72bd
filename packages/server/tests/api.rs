//! End-to-end API tests against the in-process router with a mock
//! lead source, so nothing touches the network.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use leadgen::MockLeadExtractor;
use serde_json::{json, Value};
use tower::ServiceExt;

use server_core::jobs::{JobTracker, MemoryJobStore};
use server_core::server::{build_app, AppState};

fn app_with(mock: MockLeadExtractor) -> Router {
    let tracker = Arc::new(JobTracker::new(
        Arc::new(MemoryJobStore::new()),
        Arc::new(mock),
    ));
    build_app(AppState::new(tracker))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn submit(app: &Router, body: Value) -> String {
    let (status, body) = post_json(app, "/api/extract", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    body["job_id"].as_str().unwrap().to_string()
}

/// Poll the status endpoint until the job reaches a terminal state.
async fn wait_terminal(app: &Router, job_id: &str) -> Value {
    for _ in 0..200 {
        let (status, body) = get(app, &format!("/api/status/{job_id}")).await;
        assert_eq!(status, StatusCode::OK);
        let state = body["status"].as_str().unwrap().to_string();
        if state == "completed" || state == "failed" {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {job_id} never reached a terminal state");
}

fn extract_request() -> Value {
    json!({
        "location": "Austin, USA",
        "industries": ["Technology & Software"],
        "max_results": 10,
    })
}

#[tokio::test]
async fn health_reports_healthy() {
    let app = app_with(MockLeadExtractor::new());
    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(!body["message"].as_str().unwrap().is_empty());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn industries_lists_the_catalog() {
    let app = app_with(MockLeadExtractor::new());
    let (status, body) = get(&app, "/api/industries").await;
    assert_eq!(status, StatusCode::OK);
    let industries = body["industries"].as_array().unwrap();
    assert_eq!(industries.len(), 12);
    assert!(industries.iter().any(|i| i == "Technology & Software"));
}

#[tokio::test]
async fn extraction_completes_and_serves_results() {
    let app = app_with(
        MockLeadExtractor::new().with_leads(MockLeadExtractor::canned_leads(10)),
    );
    let job_id = submit(&app, extract_request()).await;

    let status_body = wait_terminal(&app, &job_id).await;
    assert_eq!(status_body["status"], "completed");
    assert_eq!(status_body["progress"], 100);
    assert_eq!(status_body["results_count"], 10);
    assert!(status_body["error_message"].is_null());

    let (status, body) = get(&app, &format!("/api/results/{job_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 10);
    let leads = body["results"].as_array().unwrap();
    assert_eq!(leads.len(), 10);
    assert!(leads
        .iter()
        .all(|l| !l["name"].as_str().unwrap().is_empty()));
    assert_eq!(body["stats"]["total_found"], 10);
}

#[tokio::test]
async fn blank_location_is_rejected_without_creating_a_job() {
    let app = app_with(MockLeadExtractor::new());
    let (status, body) = post_json(
        &app,
        "/api/extract",
        json!({"location": "  ", "industries": ["Technology & Software"]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "location is required");
    assert!(body.get("job_id").is_none());
}

#[tokio::test]
async fn empty_industries_are_rejected() {
    let app = app_with(MockLeadExtractor::new());
    let (status, body) = post_json(
        &app,
        "/api/extract",
        json!({"location": "Austin, USA", "industries": []}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "at least one industry must be selected");
}

#[tokio::test]
async fn out_of_range_max_results_is_rejected() {
    let app = app_with(MockLeadExtractor::new());
    let mut request = extract_request();
    request["max_results"] = json!(0);
    let (status, body) = post_json(&app, "/api/extract", request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn unknown_job_id_is_not_found() {
    let app = app_with(MockLeadExtractor::new());
    let missing = "00000000-0000-0000-0000-000000000000";

    let (status, body) = get(&app, &format!("/api/status/{missing}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = get(&app, &format!("/api/results/{missing}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, &format!("/api/download/{missing}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failed_job_reports_its_error() {
    let app = app_with(MockLeadExtractor::new().failing_with("overpass unreachable"));
    let job_id = submit(&app, extract_request()).await;

    let status_body = wait_terminal(&app, &job_id).await;
    assert_eq!(status_body["status"], "failed");
    let message = status_body["error_message"].as_str().unwrap();
    assert!(message.contains("overpass unreachable"), "{message}");

    // Failed jobs have no results to serve.
    let (status, body) = get(&app, &format!("/api/results/{job_id}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn results_before_completion_are_not_ready() {
    let app = app_with(
        MockLeadExtractor::new()
            .with_leads(MockLeadExtractor::canned_leads(3))
            .with_delay(Duration::from_secs(30)),
    );
    let job_id = submit(&app, extract_request()).await;

    let (status, body) = get(&app, &format!("/api/results/{job_id}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("not completed"));
}

#[tokio::test]
async fn csv_download_matches_results() {
    let app = app_with(
        MockLeadExtractor::new().with_leads(MockLeadExtractor::canned_leads(4)),
    );
    let job_id = submit(&app, extract_request()).await;
    wait_terminal(&app, &job_id).await;

    let response = app
        .clone()
        .oneshot(
            Request::get(format!("/api/download/{job_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"business_leads_Austin_USA_"));
    assert!(disposition.ends_with(".csv\""));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "name,industry,location,email,revenue,website,phone,extraction_date"
    );
    assert_eq!(lines.len(), 5);
    assert!(lines[1].contains("Lead 1"));
}

#[tokio::test]
async fn max_results_defaults_when_omitted() {
    let app = app_with(
        MockLeadExtractor::new().with_leads(MockLeadExtractor::canned_leads(60)),
    );
    let job_id = submit(
        &app,
        json!({"location": "Austin, USA", "industries": ["Technology & Software"]}),
    )
    .await;

    wait_terminal(&app, &job_id).await;
    let (_, body) = get(&app, &format!("/api/results/{job_id}")).await;
    assert_eq!(body["count"], 50);
}
