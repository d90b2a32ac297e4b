//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Default maximum number of cache entries
pub const DEFAULT_MAX_SIZE: usize = 1000;

/// Default cache TTL in milliseconds (5 minutes)
pub const DEFAULT_TTL_MS: u64 = 300_000;

// == Runtime Profile ==
/// Runtime profile. Only `Production` runs the periodic cache sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the leaderboard cache can hold
    pub cache_max_size: usize,
    /// Default TTL in milliseconds for cache entries without explicit TTL
    pub cache_default_ttl_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Runtime profile
    pub environment: Environment,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 1000)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL_SECS` - Cleanup frequency in seconds (default: 60)
    /// - `APP_ENV` - `development`, `test` or `production` (default: development)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_max_size: parse_var("CACHE_MAX_SIZE").unwrap_or(defaults.cache_max_size),
            cache_default_ttl_ms: parse_var("CACHE_DEFAULT_TTL_MS")
                .unwrap_or(defaults.cache_default_ttl_ms),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL_SECS")
                .unwrap_or(defaults.cleanup_interval),
            environment: parse_var("APP_ENV").unwrap_or(defaults.environment),
        }
    }

    /// Whether the periodic cache sweep should run.
    pub fn cleanup_enabled(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_max_size: DEFAULT_MAX_SIZE,
            cache_default_ttl_ms: DEFAULT_TTL_MS,
            server_port: 3000,
            cleanup_interval: 60,
            environment: Environment::Development,
        }
    }
}
