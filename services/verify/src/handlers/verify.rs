use axum::{
    Json,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use url::form_urlencoded;

use crate::domain::types::ProductCode;
use crate::domain::verdict::{Verdict, VerdictStatus};
use crate::render::render_verdict_page;
use crate::state::AppState;
use crate::usecase::verify::VerifyCodeUseCase;

/// First `code` value in the raw query string.
///
/// Read by hand so a repeated or malformed parameter still ends in a verdict
/// instead of an extractor rejection.
pub fn code_param(raw_query: Option<&str>) -> Option<String> {
    form_urlencoded::parse(raw_query?.as_bytes())
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
}

// ── Response ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub status: VerdictStatus,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ProductCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    #[serde(
        serialize_with = "veritag_core::serde::to_rfc3339_ms_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub activated_at: Option<DateTime<Utc>>,
    #[serde(
        serialize_with = "veritag_core::serde::to_rfc3339_ms_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_checked_at: Option<DateTime<Utc>>,
}

impl From<&Verdict> for VerifyResponse {
    fn from(verdict: &Verdict) -> Self {
        let activated = verdict.activated();
        Self {
            status: verdict.status(),
            message: verdict.message(),
            code: activated.map(|a| a.code),
            batch_id: activated.map(|a| a.batch_id.clone()),
            activated_at: activated.map(|a| a.activated_at),
            last_checked_at: activated.map(|a| a.last_checked_at),
        }
    }
}

pub fn status_code(status: VerdictStatus) -> StatusCode {
    match status {
        VerdictStatus::Valid | VerdictStatus::Used => StatusCode::OK,
        VerdictStatus::Invalid => StatusCode::BAD_REQUEST,
        VerdictStatus::Unknown => StatusCode::NOT_FOUND,
        VerdictStatus::Error => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for VerifyResponse {
    fn into_response(self) -> Response {
        (status_code(self.status), Json(self)).into_response()
    }
}

// ── GET /api/verify ───────────────────────────────────────────────────────────

pub async fn verify(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> VerifyResponse {
    let usecase = VerifyCodeUseCase {
        registry: state.code_registry(),
    };
    let raw = code_param(raw_query.as_deref()).unwrap_or_default();
    let verdict = usecase.execute(&raw).await;
    VerifyResponse::from(&verdict)
}

// ── GET /verify ───────────────────────────────────────────────────────────────

/// Legacy page linked from early QR prints: takes the bare code as-is, no extraction.
pub async fn verify_page(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> (StatusCode, Html<String>) {
    let code = code_param(raw_query.as_deref())
        .as_deref()
        .map(str::trim)
        .and_then(|raw| raw.parse::<ProductCode>().ok());
    let verdict = match code {
        Some(code) => {
            let usecase = VerifyCodeUseCase {
                registry: state.code_registry(),
            };
            usecase.verify_code(code).await
        }
        None => Verdict::Invalid,
    };
    (
        status_code(verdict.status()),
        Html(render_verdict_page(&verdict)),
    )
}
