use axum::http::StatusCode;

/// Body returned by liveness probes.
pub const LIVENESS_BODY: &str = "ok";

/// Handler for `GET /health` and `GET /healthz`: liveness only, touches no storage.
pub async fn healthz() -> (StatusCode, &'static str) {
    (StatusCode::OK, LIVENESS_BODY)
}
