use anyhow::Context as _;
use axum::{extract::State, http::StatusCode};

use crate::error::VerifyServiceError;
use crate::state::AppState;

/// Handler for `GET /readyz`: ready only while the registry database answers.
pub async fn readyz(State(state): State<AppState>) -> Result<StatusCode, VerifyServiceError> {
    state.db.ping().await.context("ping registry database")?;
    Ok(StatusCode::OK)
}
