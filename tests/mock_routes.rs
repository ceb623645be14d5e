use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode, header},
};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use todos_api::{
    routes::API_PREFIX,
    test_helpers::{test_router, test_router_with_db},
};

fn api_path(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = app.oneshot(request).await.expect("request should succeed");
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    (status, content_type, String::from_utf8_lossy(&body).into_owned())
}

async fn json_response(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send(app, request).await;
    let json: Value = serde_json::from_str(&body).expect("body should be json");
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn list_reports_store_errors_in_the_envelope() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection refused".to_string())])
        .into_connection();

    let (status, json) = json_response(test_router_with_db(&db), get(&api_path("/todos"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Data fetch failed");
    assert_eq!(json["data"], Value::Null);
    assert!(
        json["error"]
            .as_str()
            .is_some_and(|error| error.contains("connection refused"))
    );
}

#[tokio::test]
async fn create_reports_store_rejection_in_the_envelope() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("duplicate key".to_string())])
        .into_connection();

    let (status, json) = json_response(
        test_router_with_db(&db),
        Request::builder()
            .method("POST")
            .uri(api_path("/todos"))
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "text": "Buy milk", "priority": "high", "deadline": "2025-01-01" })
                    .to_string(),
            ))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Todo add failed");
}

#[tokio::test]
async fn read_of_missing_row_is_a_null_success() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<todos_api::db::entities::todo::Model>::new()])
        .into_connection();

    let (status, json) = json_response(
        test_router_with_db(&db),
        get(&api_path(&format!("/todos/{}", Uuid::new_v4()))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({ "success": true, "message": "Todo fetched successfully", "data": null })
    );
}

#[tokio::test]
async fn delete_of_missing_row_still_succeeds() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let (status, json) = json_response(
        test_router_with_db(&db),
        Request::builder()
            .method("DELETE")
            .uri(api_path(&format!("/todos/{}", Uuid::new_v4())))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Todo deleted successfully");
}

#[tokio::test]
async fn unknown_routes_are_rewritten_into_envelopes() {
    let (status, json) = json_response(test_router(), get(&api_path("/nope"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Not Found");
    assert_eq!(json["data"], Value::Null);
}

#[tokio::test]
async fn wrong_method_keeps_its_status() {
    let (status, json) = json_response(
        test_router(),
        Request::builder()
            .method("PUT")
            .uri(api_path("/todos"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Method Not Allowed");
}

#[tokio::test]
async fn root_serves_the_welcome_page() {
    let (status, content_type, body) = send(test_router(), get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.is_some_and(|value| value.starts_with("text/html")));
    assert!(body.contains("Welcome to the Todos API"));
}

#[tokio::test]
async fn cors_allows_browser_clients_from_other_origins() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(api_path("/todos"))
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request should succeed");

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}
