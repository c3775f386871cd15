use std::env;
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database: PgConnectOptions,
    pub db_max_connections: u32,
    pub db_min_connections: u32,

    // Server
    pub host: String,
    pub port: u16,

    // Logging
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = match lookup("DATABASE_URL") {
            Some(url) => PgConnectOptions::from_str(&url)
                .map_err(|_| ConfigError::Invalid("DATABASE_URL"))?,
            None => PostgresParams::from_lookup(&lookup)?.connect_options(),
        };

        Ok(Self {
            // Database
            database,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            db_min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 1)?,

            // Server
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,

            // Logging
            log_format: match lookup("LOG_FORMAT").as_deref() {
                None | Some("text") => LogFormat::Text,
                Some("json") => LogFormat::Json,
                Some(_) => return Err(ConfigError::Invalid("LOG_FORMAT")),
            },
        })
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Discrete Postgres connection parameters, used when `DATABASE_URL` is unset
#[derive(Debug, Clone)]
pub struct PostgresParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl PostgresParams {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: lookup("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_or(lookup, "POSTGRES_PORT", 5432)?,
            user: lookup("POSTGRES_USER").ok_or(ConfigError::Missing("POSTGRES_USER"))?,
            password: lookup("POSTGRES_PASSWORD").unwrap_or_default(),
            database: lookup("POSTGRES_DB").ok_or(ConfigError::Missing("POSTGRES_DB"))?,
        })
    }

    /// Values are passed through as-is, no URL encoding involved
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database)
            .ssl_mode(PgSslMode::Disable);

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }
}

/// Loggable description of a connection target; never includes the password
pub fn describe_database(options: &PgConnectOptions) -> String {
    format!(
        "{}@{}:{}/{}",
        options.get_username(),
        options.get_host(),
        options.get_port(),
        options.get_database().unwrap_or_default()
    )
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid environment variable: {0}")]
    Invalid(&'static str),
}
