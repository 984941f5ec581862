//! Runtime settings read from the environment (after loading `.env`).

use crate::error::ConfigError;
use axum::http::HeaderValue;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/students";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_SCHEMA: &str = "public";

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    /// Schema holding the students table. Must be a valid PostgreSQL identifier.
    pub db_schema: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// The single browser origin allowed by CORS.
    pub cors_allowed_origin: HeaderValue,
}

impl Settings {
    /// Read `DATABASE_URL`, `DB_SCHEMA`, `BIND_ADDR`, `DB_MAX_CONNECTIONS` and
    /// `CORS_ALLOWED_ORIGIN`, falling back to defaults for unset keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind = get("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind.clone(),
        })?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => match v.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DB_MAX_CONNECTIONS",
                        value: v,
                    })
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let origin = get("CORS_ALLOWED_ORIGIN", DEFAULT_CORS_ORIGIN);
        let cors_allowed_origin = HeaderValue::from_str(&origin).map_err(|_| ConfigError::Invalid {
            key: "CORS_ALLOWED_ORIGIN",
            value: origin.clone(),
        })?;

        let db_schema = get("DB_SCHEMA", DEFAULT_SCHEMA);
        if db_schema.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "DB_SCHEMA",
                value: db_schema,
            });
        }

        Ok(Settings {
            database_url: get("DATABASE_URL", DEFAULT_DATABASE_URL),
            db_schema,
            bind_addr,
            max_connections,
            cors_allowed_origin,
        })
    }
}
