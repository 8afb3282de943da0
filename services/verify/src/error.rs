use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Verify service error variants.
///
/// Business outcomes (unknown code, already used) are verdicts, not errors.
/// Only infrastructure failures live here.
#[derive(Debug, thiserror::Error)]
pub enum VerifyServiceError {
    #[error("storage unavailable")]
    StorageUnavailable(#[from] anyhow::Error),
}

impl VerifyServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
        }
    }
}

impl IntoResponse for VerifyServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        let Self::StorageUnavailable(ref e) = self;
        tracing::error!(error = ?e, kind = self.kind(), "storage unavailable");
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
