//! Configuration module with business-specific sub-modules
//!
//! - `cache` - Redis connections and the region cache TTL
//! - `database` - MySQL connection pool
//! - `environment` - Environment detection and logging
//! - `server` - HTTP server
//! - `sms` - SMS gateway account and provider selection
//! - `verification` - Image challenge and SMS code lifetimes

pub mod cache;
pub mod database;
pub mod environment;
pub mod server;
pub mod sms;
pub mod verification;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use cache::{AreaCacheConfig, CacheConfig, AREA_CACHE_DB, VERIFICATION_CACHE_DB};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use sms::SmsConfig;
pub use verification::{DispatchMode, VerificationConfig};

/// Read and parse an environment variable, falling back on absence or parse failure
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,

    pub server: ServerConfig,

    pub database: DatabaseConfig,

    /// Redis connection backing the region cache
    pub cache: CacheConfig,

    /// Redis connection backing challenges, codes and throttle flags
    pub verification_cache: CacheConfig,

    pub area_cache: AreaCacheConfig,

    pub verification: VerificationConfig,

    pub sms: SmsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            verification_cache: CacheConfig::default().with_database(VERIFICATION_CACHE_DB),
            area_cache: AreaCacheConfig::default(),
            verification: VerificationConfig::default(),
            sms: SmsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            verification_cache: CacheConfig::verification_from_env(),
            area_cache: AreaCacheConfig::from_env(),
            verification: VerificationConfig::from_env(),
            sms: SmsConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Check that settings which cannot work together are not combined
    pub fn validate(&self) -> Result<(), String> {
        if self.verification.send_interval_seconds == 0 {
            return Err("SMS send interval must be greater than zero".to_string());
        }
        if self.verification.sms_code_expiry_seconds < 60 {
            return Err("SMS code expiry must be at least one minute".to_string());
        }
        if self.environment.is_production() && self.sms.provider == "mock" {
            return Err("Mock SMS provider is not allowed in production".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_separate_verification_db() {
        let config = AppConfig::default();
        assert_eq!(config.cache.database, AREA_CACHE_DB);
        assert_eq!(config.verification_cache.database, VERIFICATION_CACHE_DB);
        assert_eq!(config.area_cache.ttl_seconds, 3600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_mock_in_production() {
        let config = AppConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        assert_eq!(env_or("MALL_TEST_UNSET_VARIABLE", 7u64), 7);
    }
}
