// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup and frozen into
//! an immutable [`Config`] value that is handed to the components needing it.
//! Nothing reads the environment per request.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | HMAC secret for signing and verifying bearer tokens | Unset (gated routes answer 500) |
//! | `JWT_LEEWAY_SECS` | Clock skew tolerance applied to `exp` | `0` |
//! | `USER_STORE` | User store backend (`mongo` or `memory`) | `mongo` |
//! | `MONGO_URI` | MongoDB connection string | Required for `mongo` |
//! | `MONGO_DATABASE` | MongoDB database name | Required for `mongo` |
//! | `REQUEST_TIMEOUT_SECS` | Deadline for a single store operation | `10` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::fmt;
use std::time::Duration;

/// Environment variable name for the token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
/// Environment variable name for the clock skew tolerance in seconds.
pub const JWT_LEEWAY_ENV: &str = "JWT_LEEWAY_SECS";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const USER_STORE_ENV: &str = "USER_STORE";
pub const MONGO_URI_ENV: &str = "MONGO_URI";
pub const MONGO_DATABASE_ENV: &str = "MONGO_DATABASE";
pub const REQUEST_TIMEOUT_ENV: &str = "REQUEST_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration errors raised while reading the environment.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },

    #[error("signing secret must not be empty")]
    EmptySecret,
}

/// Shared HMAC secret used to sign and verify bearer tokens.
///
/// Always non-empty. The value is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        Ok(Self(value))
    }

    /// Read the secret from `JWT_SECRET`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let value = std::env::var(JWT_SECRET_ENV).map_err(|_| ConfigError::Missing(JWT_SECRET_ENV))?;
        Self::new(value).map_err(|_| ConfigError::Missing(JWT_SECRET_ENV))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(****)")
    }
}

/// Output format for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// Which [`UserStore`](crate::storage::UserStore) backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo { uri: String, database: String },
    Memory,
}

/// Immutable process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// `None` when `JWT_SECRET` is unset or empty.
    pub jwt_secret: Option<Secret>,
    pub jwt_leeway_secs: u64,
    pub store: StoreBackend,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, PORT_ENV, DEFAULT_PORT)?;
        let jwt_secret = lookup(JWT_SECRET_ENV).and_then(|value| Secret::new(value).ok());
        let jwt_leeway_secs = parse_or(&lookup, JWT_LEEWAY_ENV, 0u64)?;
        let request_timeout = parse_or(&lookup, REQUEST_TIMEOUT_ENV, DEFAULT_REQUEST_TIMEOUT.as_secs())
            .map(Duration::from_secs)?;

        let store = match lookup(USER_STORE_ENV).as_deref() {
            None | Some("mongo") => StoreBackend::Mongo {
                uri: lookup(MONGO_URI_ENV).ok_or(ConfigError::Missing(MONGO_URI_ENV))?,
                database: lookup(MONGO_DATABASE_ENV).ok_or(ConfigError::Missing(MONGO_DATABASE_ENV))?,
            },
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: USER_STORE_ENV,
                    value: other.to_string(),
                })
            }
        };

        let log_format = match lookup(LOG_FORMAT_ENV).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: LOG_FORMAT_ENV,
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            jwt_secret,
            jwt_leeway_secs,
            store,
            request_timeout,
            log_format,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { var, value }),
    }
}
