//! Environment-backed configuration.
//!
//! All settings come from environment-style key/value pairs (a `.env` file
//! is loaded first when present). Numeric provider tunables parse leniently:
//! a malformed value substitutes its documented default instead of failing,
//! so provider bring-up survives partial misconfiguration.

use std::env;
use tracing::debug;

/// Root configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Selected provider name (`AGGREGATOR`). May be overridden by the CLI.
    pub aggregator: String,

    /// Database connection settings.
    pub database: DatabaseConfig,

    /// Callback listener and outbound notification settings.
    pub callback: CallbackConfig,

    /// Settings for the SansGetirSin provider.
    pub sansgetirsin: SansGetirSinConfig,
}

impl Config {
    /// Read the full configuration from the process environment.
    pub fn from_env() -> Self {
        Self {
            aggregator: env_or("AGGREGATOR", ""),
            database: DatabaseConfig::from_env(),
            callback: CallbackConfig::from_env(),
            sansgetirsin: SansGetirSinConfig::from_env(),
        }
    }
}

/// Database connection settings (`DATABASE_*`).
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub protocol: String,
    pub host: String,
    pub port: String,
    pub name: String,
}

impl DatabaseConfig {
    fn from_env() -> Self {
        Self {
            protocol: env_or("DATABASE_PROTOCOL", "mongodb://"),
            host: env_or("DATABASE_BASE", "localhost"),
            port: env_or("DATABASE_PORT", "27017"),
            name: env_or("DATABASE_NAME", "payments"),
        }
    }

    /// Compose the connection URI from its parts.
    pub fn uri(&self) -> String {
        format!("{}{}:{}/{}", self.protocol, self.host, self.port, self.name)
    }
}

/// Callback settings: where we listen for provider webhooks and where we
/// notify the external system after a successful deposit (`CALLBACK_*`).
#[derive(Debug, Clone)]
pub struct CallbackConfig {
    /// Outbound notification URL. Empty disables the notification.
    pub url: String,
    pub listen_host: String,
    pub listen_port: u16,
}

impl CallbackConfig {
    fn from_env() -> Self {
        Self {
            url: env_or("CALLBACK_URL", ""),
            listen_host: env_or("CALLBACK_HOST", "127.0.0.1"),
            listen_port: parse_u16_or(env::var("CALLBACK_PORT").ok().as_deref(), 8080),
        }
    }

    /// Bind address for the inbound listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_host, self.listen_port)
    }
}

/// SansGetirSin provider settings (`SANSGETIRSIN_*`).
///
/// The base URL is derived from the environment-specific API key segment:
/// `https://api-{key}.sansgetirsin.com`.
#[derive(Debug, Clone)]
pub struct SansGetirSinConfig {
    pub key: String,
    pub username: String,
    pub api_key: String,
    pub user_id: String,
    /// Numeric tunable; defaults to 1 on missing or malformed input.
    pub payment_method: f64,
    /// Numeric tunable; defaults to 1000 on missing or malformed input.
    pub max_withdraw_limit: f64,
    /// Per-request deadline in seconds; defaults to 30.
    pub timeout_seconds: u64,
}

impl SansGetirSinConfig {
    fn from_env() -> Self {
        Self {
            key: env_or("SANSGETIRSIN_KEY", ""),
            username: env_or("SANSGETIRSIN_USERNAME", ""),
            api_key: env_or("SANSGETIRSIN_API_KEY", ""),
            user_id: env_or("SANSGETIRSIN_USER_ID", ""),
            payment_method: parse_f64_or(
                env::var("SANSGETIRSIN_PAYMENT_METHOD").ok().as_deref(),
                1.0,
            ),
            max_withdraw_limit: parse_f64_or(
                env::var("SANSGETIRSIN_MAX_WITHDRAW_LIMIT").ok().as_deref(),
                1000.0,
            ),
            timeout_seconds: parse_u64_or(
                env::var("SANSGETIRSIN_TIMEOUT_SECONDS").ok().as_deref(),
                30,
            ),
        }
    }

    pub fn base_url(&self) -> String {
        format!("https://api-{}.sansgetirsin.com", self.key)
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a float, falling back to a default if the value is missing or
/// malformed. Never fails.
fn parse_f64_or(raw: Option<&str>, default: f64) -> f64 {
    match raw.map(str::parse::<f64>) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            debug!("Ignoring malformed numeric setting {:?}, using {}", raw, default);
            default
        }
        None => default,
    }
}

fn parse_u64_or(raw: Option<&str>, default: u64) -> u64 {
    match raw.map(str::parse::<u64>) {
        Some(Ok(value)) => value,
        Some(Err(_)) => default,
        None => default,
    }
}

fn parse_u16_or(raw: Option<&str>, default: u16) -> u16 {
    match raw.map(str::parse::<u16>) {
        Some(Ok(value)) => value,
        Some(Err(_)) => default,
        None => default,
    }
}
