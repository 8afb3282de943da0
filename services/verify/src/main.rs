use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database};
use tracing::{info, warn};

use veritag_core::config::Config;
use veritag_core::middleware::cors_allow_list_layer;
use veritag_core::tracing::init_tracing;
use veritag_verify::config::VerifyConfig;
use veritag_verify::router::build_router;
use veritag_verify::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = VerifyConfig::from_env();

    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .sqlx_logging(false);
    let db = Arc::new(
        Database::connect(options)
            .await
            .expect("failed to connect to database"),
    );

    let state = AppState {
        db: Arc::clone(&db),
    };

    let router = build_router(state).layer(cors_allow_list_layer(&config.cors_allowed_origins));
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!(
        %addr,
        max_connections = config.db_max_connections,
        cors_origins = config.cors_allowed_origins.len(),
        "verify service listening"
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    // The router and its state are dropped once serving ends.
    match Arc::into_inner(db) {
        Some(db) => {
            if let Err(e) = db.close().await {
                warn!(error = %e, "failed to close registry pool");
            }
        }
        None => warn!("registry pool still shared at shutdown, dropping without close"),
    }
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { info!("received SIGINT, shutting down"); }
        _ = terminate => { info!("received SIGTERM, shutting down"); }
    }
}
