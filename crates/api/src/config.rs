use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, multi-field lines (default).
    Pretty,
    /// One JSON object per event, for log shippers.
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

/// Credentials for the admin account created on first start, if any.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields except `DATABASE_URL` and `JWT_SECRET` have defaults suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on graceful shutdown in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub database_url: String,
    /// Pool size (default: [`salon_db::DEFAULT_MAX_CONNECTIONS`]).
    pub db_max_connections: u32,
    pub log_format: LogFormat,
    pub jwt: JwtConfig,
    pub admin_bootstrap: Option<AdminBootstrap>,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:4200`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `DATABASE_URL`         | required                   |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    /// | `LOG_FORMAT`           | `pretty` (`json`)          |
    /// | `ADMIN_USERNAME`, `ADMIN_EMAIL`, `ADMIN_PASSWORD` | unset |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 3000)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:4200".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let shutdown_timeout_secs = parse_or(&lookup, "SHUTDOWN_TIMEOUT_SECS", 30)?;

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let db_max_connections =
            parse_or(&lookup, "DB_MAX_CONNECTIONS", salon_db::DEFAULT_MAX_CONNECTIONS)?;
        let log_format = parse_or(&lookup, "LOG_FORMAT", LogFormat::Pretty)?;

        let jwt = JwtConfig::from_lookup(&lookup)?;

        let admin_bootstrap = match (
            lookup("ADMIN_USERNAME"),
            lookup("ADMIN_EMAIL"),
            lookup("ADMIN_PASSWORD"),
        ) {
            (Some(username), Some(email), Some(password)) => Some(AdminBootstrap {
                username,
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            database_url,
            db_max_connections,
            log_format,
            jwt,
            admin_bootstrap,
        })
    }
}

/// Parse `name` if present, otherwise fall back to `default`.
pub(crate) fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
