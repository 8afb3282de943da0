use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult};
use serde_json::Value;

use veritag_verify::router::build_router;
use veritag_verify::state::AppState;
use veritag_verify_schema::product_codes;

use crate::helpers::{CODE, code_model, fixed_time};

fn server(db: MockDatabase) -> TestServer {
    server_on(db.into_connection())
}

fn server_on(db: DatabaseConnection) -> TestServer {
    let state = AppState { db: Arc::new(db) };
    TestServer::new(build_router(state)).unwrap()
}

fn empty_db() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

fn updated(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

#[tokio::test]
async fn should_answer_liveness_without_database() {
    let server = server(empty_db());
    for path in ["/health", "/healthz"] {
        let resp = server.get(path).await;
        assert_eq!(resp.status_code(), StatusCode::OK);
        assert_eq!(resp.text(), "ok");
    }
}

#[tokio::test]
async fn should_return_400_for_input_without_code() {
    // An empty mock fails any query, so a 400 proves storage was not consulted.
    let server = server(empty_db());

    let resp = server
        .get("/api/verify")
        .add_query_param("code", "garbage no code here")
        .await;
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["status"], "invalid");
    assert!(body.get("batch_id").is_none());

    let resp = server.get("/api/verify").await;
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_return_404_for_unregistered_code() {
    let db = empty_db().append_query_results([Vec::<product_codes::Model>::new()]);
    let resp = server(db)
        .get("/api/verify")
        .add_query_param("code", CODE)
        .await;
    assert_eq!(resp.status_code(), StatusCode::NOT_FOUND);
    let body: Value = resp.json();
    assert_eq!(body["status"], "unknown");
}

#[tokio::test]
async fn should_return_valid_on_first_activation() {
    let db = empty_db()
        .append_query_results([
            vec![code_model(None, None)],
            vec![code_model(Some(fixed_time(1)), Some(fixed_time(1)))],
        ])
        .append_exec_results([updated(1)]);
    let resp = server(db)
        .get("/api/verify")
        .add_query_param(
            "code",
            format!("https://shop.example/pages/verify?code={CODE}&utm=x"),
        )
        .await;

    assert_eq!(resp.status_code(), StatusCode::OK);
    let body: Value = resp.json();
    assert_eq!(body["status"], "valid");
    assert_eq!(body["code"], CODE);
    assert_eq!(body["batch_id"], "B1");
    assert_eq!(body["activated_at"], "2026-04-01T12:01:00.000Z");
    assert_eq!(body["last_checked_at"], "2026-04-01T12:01:00.000Z");
}

#[tokio::test]
async fn should_return_used_with_original_activation_time() {
    let db = empty_db()
        .append_query_results([
            vec![code_model(Some(fixed_time(1)), Some(fixed_time(1)))],
            Vec::new(),
            vec![code_model(Some(fixed_time(1)), Some(fixed_time(9)))],
        ])
        .append_exec_results([updated(1)]);
    let resp = server(db)
        .get("/api/verify")
        .add_query_param("code", CODE)
        .await;

    assert_eq!(resp.status_code(), StatusCode::OK);
    let body: Value = resp.json();
    assert_eq!(body["status"], "used");
    assert_eq!(body["activated_at"], "2026-04-01T12:01:00.000Z");
    assert_eq!(body["last_checked_at"], "2026-04-01T12:09:00.000Z");
}

#[tokio::test]
async fn should_return_500_without_verdict_details_when_storage_fails() {
    let db = empty_db().append_query_errors([DbErr::Custom("connection reset".to_owned())]);
    let resp = server(db)
        .get("/api/verify")
        .add_query_param("code", CODE)
        .await;

    assert_eq!(resp.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body["status"], "error");
    assert!(body.get("batch_id").is_none());
    assert!(!resp.text().contains("connection reset"));
}

#[tokio::test]
async fn should_render_legacy_page_for_bare_code() {
    let db = empty_db()
        .append_query_results([
            vec![code_model(None, None)],
            vec![code_model(Some(fixed_time(2)), Some(fixed_time(2)))],
        ])
        .append_exec_results([updated(1)]);
    let resp = server(db).get("/verify").add_query_param("code", CODE).await;

    assert_eq!(resp.status_code(), StatusCode::OK);
    let page = resp.text();
    assert!(page.contains(r#"data-status="valid""#));
    assert!(page.contains("<dd>B1</dd>"));
}

#[tokio::test]
async fn should_not_extract_codes_on_legacy_page() {
    let resp = server(empty_db())
        .get("/verify")
        .add_query_param("code", format!("https://shop.example/verify?code={CODE}"))
        .await;

    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    assert!(resp.text().contains(r#"data-status="invalid""#));
}

#[tokio::test]
async fn should_answer_repeated_code_param_with_verdict() {
    // First `code` wins; storage is never reached for an unusable value.
    let server = server(empty_db());
    let query = format!("code=x&code={CODE}");

    let resp = server.get("/api/verify").add_raw_query_param(&query).await;
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["status"], "invalid");

    let resp = server.get("/verify").add_raw_query_param(&query).await;
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    assert!(resp.text().contains(r#"data-status="invalid""#));
}

#[tokio::test]
async fn should_extract_from_unencoded_scanned_url() {
    let db = empty_db()
        .append_query_results([
            vec![code_model(None, None)],
            vec![code_model(Some(fixed_time(3)), Some(fixed_time(3)))],
        ])
        .append_exec_results([updated(1)]);
    let resp = server(db)
        .get("/api/verify")
        .add_raw_query_param(&format!("code=https://shop.example/verify?code={CODE}"))
        .await;

    assert_eq!(resp.status_code(), StatusCode::OK);
    let body: Value = resp.json();
    assert_eq!(body["status"], "valid");
}

#[tokio::test]
async fn should_report_ready_when_database_answers() {
    let resp = server(empty_db()).get("/readyz").await;
    assert_eq!(resp.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn should_report_not_ready_when_database_is_gone() {
    let resp = server_on(DatabaseConnection::Disconnected).get("/readyz").await;

    assert_eq!(resp.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "STORAGE_UNAVAILABLE");
    assert!(!resp.text().contains("Disconnected"));
}
