//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! The loaded [`Config`] is an ordinary value: the server builds it once, derives the
//! [`TokenCodec`] from it and hands both to the router state. Nothing reads the
//! environment after startup.
//!
//! ```rust,no_run
//! use lib_core::Config;
//!
//! let config = Config::from_env().and_then(|c| c.validate().map(|_| c))?;
//! let codec = config.token_codec();
//! # Ok::<(), lib_core::AppError>(())
//! ```

use crate::error::{AppError, Result};
use chrono::Duration;
use lib_auth::TokenCodec;
use lib_utils::{get_env, get_env_opt, get_env_parse, envs};
use std::fmt;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/cuba_payment.db";
pub const DEFAULT_ROUTE_API_URL: &str = "https://api.openrouteservice.org";

/// Minimum accepted length of the signing secret.
pub const MIN_SECRET_LEN: usize = 32;
/// Upper bound for the token lifetime (30 days).
pub const MAX_TOKEN_TTL_MINUTES: i64 = 30 * 24 * 60;

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for token signing and verification (`CYPHER_SECRET`)
    ///
    /// **Must be at least 32 characters long.**
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    pub token_ttl_minutes: i64,

    /// API key for the external directions service
    pub route_api_key: Option<String>,

    /// Base URL of the external directions service
    pub route_api_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let database_url =
            get_env_opt("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let jwt_secret = get_env("CYPHER_SECRET").map_err(config_err)?;

        let token_ttl_minutes = match get_env_parse("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Ok(minutes) => minutes,
            Err(envs::Error::MissingEnv(_)) => TokenCodec::DEFAULT_TTL_MINUTES,
            Err(e) => return Err(config_err(e)),
        };

        let route_api_key = get_env_opt("OPENSTREET_API_KEY");
        let route_api_url = get_env_opt("ROUTE_API_URL")
            .unwrap_or_else(|| DEFAULT_ROUTE_API_URL.to_string());

        Ok(Self {
            database_url,
            jwt_secret,
            token_ttl_minutes,
            route_api_key,
            route_api_url,
        })
    }

    /// Validate configuration values against security rules.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(AppError::Config(format!(
                "CYPHER_SECRET must be at least {MIN_SECRET_LEN} characters long"
            )));
        }

        if self.token_ttl_minutes < 1 || self.token_ttl_minutes > MAX_TOKEN_TTL_MINUTES {
            return Err(AppError::Config(format!(
                "ACCESS_TOKEN_EXPIRE_MINUTES must be between 1 and {MAX_TOKEN_TTL_MINUTES}"
            )));
        }

        if !self.route_api_url.starts_with("http://") && !self.route_api_url.starts_with("https://") {
            return Err(AppError::Config("ROUTE_API_URL must be an http(s) URL".to_string()));
        }

        Ok(())
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::minutes(self.token_ttl_minutes)
    }

    /// Build the token codec for this configuration's secret and lifetime.
    pub fn token_codec(&self) -> TokenCodec {
        TokenCodec::new(&self.jwt_secret).with_default_ttl(self.token_ttl())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"***REDACTED***")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("route_api_key", &self.route_api_key.as_ref().map(|_| "***REDACTED***"))
            .field("route_api_url", &self.route_api_url)
            .finish()
    }
}

fn config_err(e: envs::Error) -> AppError {
    AppError::Config(e.to_string())
}
