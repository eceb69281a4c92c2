//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SITE_JWT_SECRET` - Token signing secret (min 32 chars, high entropy)
//! - `SITE_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`; not needed with `SITE_STORAGE=memory`)
//!
//! ## Optional
//! - `SITE_STORAGE` - `postgres` (default) or `memory`
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 6001)
//! - `SITE_TOKEN_TTL_HOURS` - Admin token lifetime, 1 to 8760 (default: 24)
//! - `SITE_ALLOW_REGISTRATION` - Whether `POST /api/auth/register` is open (default: true)
//! - `SITE_CORS_ORIGINS` - Comma-separated browser origins allowed to call the API (no `*`)
//! - `SITE_STATIC_DIR` - Directory served under `/static`
//! - `LOG_FORMAT` - `text` (default) or `json`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.1)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_JWT_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Where enquiries and admins are kept.
#[derive(Clone)]
pub enum Storage {
    /// `PostgreSQL` at the given connection URL.
    Postgres(SecretString),
    /// Process-local store, lost on restart.
    Memory,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres(_) => f.write_str("Postgres([REDACTED])"),
            Self::Memory => f.write_str("Memory"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct ServerConfig {
    /// Storage backend
    pub storage: Storage,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// HMAC key for admin bearer tokens
    pub jwt_secret: SecretString,
    /// Admin token lifetime in hours
    pub token_ttl_hours: i64,
    /// Whether new admins may register over HTTP
    pub allow_registration: bool,
    /// Origins allowed by the CORS layer
    pub cors_allowed_origins: Vec<String>,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("storage", &self.storage)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("allow_registration", &self.allow_registration)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("static_dir", &self.static_dir)
            .field("log_format", &self.log_format)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .finish_non_exhaustive()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the token secret fails validation (length, placeholder, entropy).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage = match get_env_or_default("SITE_STORAGE", "postgres").as_str() {
            "postgres" => Storage::Postgres(get_database_url("SITE_DATABASE_URL")?),
            "memory" => Storage::Memory,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "SITE_STORAGE".to_string(),
                    format!("expected 'postgres' or 'memory', got '{other}'"),
                ));
            }
        };
        let host = parse_env("SITE_HOST", "127.0.0.1")?;
        let port = parse_env("SITE_PORT", "6001")?;
        let jwt_secret = get_validated_secret("SITE_JWT_SECRET")?;
        validate_jwt_secret(&jwt_secret, "SITE_JWT_SECRET")?;
        let token_ttl_hours = validate_token_ttl(parse_env("SITE_TOKEN_TTL_HOURS", "24")?)?;
        let allow_registration = parse_env("SITE_ALLOW_REGISTRATION", "true")?;
        let cors_allowed_origins =
            parse_origin_list(&get_env_or_default("SITE_CORS_ORIGINS", DEFAULT_CORS_ORIGINS))?;
        let static_dir = PathBuf::from(get_env_or_default(
            "SITE_STATIC_DIR",
            "crates/server/static",
        ));
        let log_format = match get_env_or_default("LOG_FORMAT", "text").as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            storage,
            host,
            port,
            jwt_secret,
            token_ttl_hours,
            allow_registration,
            cors_allowed_origins,
            static_dir,
            log_format,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.1")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable (or its default) into `T`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
///
/// `*` is rejected: the API allows credentials, which browsers refuse to
/// combine with a wildcard origin.
fn parse_origin_list(raw: &str) -> Result<Vec<String>, ConfigError> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect();

    if origins.iter().any(|origin| origin == "*") {
        return Err(ConfigError::InvalidEnvVar(
            "SITE_CORS_ORIGINS".to_string(),
            "wildcard cannot be combined with credentials".to_string(),
        ));
    }
    Ok(origins)
}

/// Token lifetime must be between one hour and one year.
fn validate_token_ttl(hours: i64) -> Result<i64, ConfigError> {
    if (1..=MAX_TOKEN_TTL_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        Err(ConfigError::InvalidEnvVar(
            "SITE_TOKEN_TTL_HOURS".to_string(),
            format!("must be between 1 and {MAX_TOKEN_TTL_HOURS}, got {hours}"),
        ))
    }
}

/// Validate that the token secret meets minimum length requirements.
fn validate_jwt_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_JWT_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
