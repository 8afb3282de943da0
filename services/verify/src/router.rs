use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use veritag_core::health::healthz;
use veritag_core::middleware::request_id_layer;

use crate::handlers::{
    health::readyz,
    verify::{verify, verify_page},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(healthz))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Verification
        .route("/api/verify", get(verify))
        // Legacy page for codes printed before the structured endpoint existed
        .route("/verify", get(verify_page))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}
