use serde::Deserialize;

use veritag_core::config::Config;

/// Verify service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct VerifyConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port to listen on (default 3000). Env var: `PORT`.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound of the registry connection pool. Env var: `DB_MAX_CONNECTIONS`.
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    /// Seconds a request waits for a pooled connection before failing.
    /// Env var: `DB_ACQUIRE_TIMEOUT_SECS`.
    #[serde(default = "default_db_acquire_timeout_secs")]
    pub db_acquire_timeout_secs: u64,
    /// Comma-separated origins allowed to call the API from a browser.
    /// Env var: `CORS_ALLOWED_ORIGINS`.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

impl Config for VerifyConfig {}

fn default_port() -> u16 {
    3000
}

fn default_db_max_connections() -> u32 {
    10
}

fn default_db_acquire_timeout_secs() -> u64 {
    5
}
