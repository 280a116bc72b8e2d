use serde::Deserialize;

/// Configuration options of the cookbook service.
///
/// Loaded from `config/default.yaml`, an optional `config/{APP_ENV}.yaml`
/// and `APP_*` environment variables, in that order of precedence.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind the HTTP server to.
    pub address: String,
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Session cookie signing key, at least 64 bytes. Also verifies the
    /// tokens issued by the auth service.
    pub secret_key: String,
    /// Login page of the shared auth service.
    pub auth_service_url: String,
    /// Maximum number of entries returned by the upcoming publications feed.
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
}

fn default_upcoming_limit() -> usize {
    5
}
