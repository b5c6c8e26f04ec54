//! Server settings from the environment (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use axum::http::HeaderValue;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/students";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    /// PostgreSQL URL, or `memory` for the in-memory store.
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    /// The single origin allowed to make credentialed cross-origin calls.
    pub cors_origin: HeaderValue,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: v.clone() })?,
            None => DEFAULT_PORT,
        };
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                value: v.clone(),
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let origin = lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into());
        let cors_origin = HeaderValue::from_str(origin.trim())
            .map_err(|_| ConfigError::Invalid { key: "CORS_ORIGIN", value: origin.clone() })?;

        Ok(ServerConfig {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            port,
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
                max_connections,
            },
            cors_origin,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
