//! API server configuration.

use storefront_core::auth::jwt::resolve_jwt_secret;

/// Default access-token lifetime: 1 hour.
const DEFAULT_ACCESS_TTL_SECS: i64 = 60 * 60;

/// Default refresh-token lifetime: 24 hours.
const DEFAULT_REFRESH_TTL_SECS: i64 = 24 * 60 * 60;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Access-token lifetime in seconds.
    pub access_ttl_secs: i64,
    /// Refresh-token lifetime in seconds.
    pub refresh_ttl_secs: i64,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                     | Default                                  |
    /// |------------------------------|------------------------------------------|
    /// | `BIND_ADDR`                  | `127.0.0.1:3000`                         |
    /// | `DATABASE_URL`               | `postgres://localhost:5432/storefront`   |
    /// | `JWT_SECRET` / `AUTH_SECRET` | generated & persisted to file            |
    /// | `ACCESS_TOKEN_TTL_SECS`      | `3600`                                   |
    /// | `REFRESH_TOKEN_TTL_SECS`     | `86400`                                  |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/storefront".into()),
            jwt_secret: resolve_jwt_secret(),
            access_ttl_secs: env_i64("ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TTL_SECS),
            refresh_ttl_secs: env_i64("REFRESH_TOKEN_TTL_SECS", DEFAULT_REFRESH_TTL_SECS),
        }
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
