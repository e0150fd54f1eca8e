//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Coachbook API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `DEFAULT_TIMEZONE`: IANA zone used when a request names none (default: "UTC")
//! - `SELECTION_COOKIE_TTL_DAYS`: Lifetime of the selected-user cookie (default: 30)
//! - `SELECTION_COOKIE_SECURE`: Mark the selected-user cookie `Secure` (default: false)

use chrono_tz::Tz;
use eyre::{Result, WrapErr, eyre};
use std::env;
use tracing::Level;

/// Configuration for the Coachbook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use coachbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Zone applied to window math when a request does not name one
    pub default_timezone: Tz,

    /// Selected-user cookie settings
    pub cookie: CookieSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieSettings {
    pub max_age_secs: i64,
    pub secure: bool,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            max_age_secs: 30 * 24 * 60 * 60,
            secure: false,
        }
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - DEFAULT_TIMEZONE does not name an IANA zone
    /// - SELECTION_COOKIE_TTL_DAYS is not a positive number of days
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Scheduling settings
        let zone_name = env::var("DEFAULT_TIMEZONE").unwrap_or_else(|_| "UTC".to_string());
        let default_timezone = zone_name
            .parse::<Tz>()
            .map_err(|e| eyre!("Invalid DEFAULT_TIMEZONE value {:?}: {}", zone_name, e))?;

        // Session cookie settings
        let ttl_days: i64 = env::var("SELECTION_COOKIE_TTL_DAYS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .wrap_err("Invalid SELECTION_COOKIE_TTL_DAYS value")?;
        if ttl_days <= 0 {
            return Err(eyre!("SELECTION_COOKIE_TTL_DAYS must be positive"));
        }
        let secure = env::var("SELECTION_COOKIE_SECURE")
            .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            default_timezone,
            cookie: CookieSettings {
                max_age_secs: ttl_days * 24 * 60 * 60,
                secure,
            },
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_log_level(raw: &str) -> Level {
    match raw {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
