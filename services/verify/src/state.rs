use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::infra::db::DbCodeRegistry;

/// Shared application state passed to every handler via axum `State`.
///
/// `db` is the pooled registry connection created at startup; cloning shares the pool.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
}

impl AppState {
    pub fn code_registry(&self) -> DbCodeRegistry {
        DbCodeRegistry {
            db: Arc::clone(&self.db),
        }
    }
}
