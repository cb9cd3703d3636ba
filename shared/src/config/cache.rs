//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Redis database holding region lookups
pub const AREA_CACHE_DB: u8 = 0;

/// Redis database holding image challenges, SMS codes and throttle flags
pub const VERIFICATION_CACHE_DB: u8 = 2;

/// Redis connection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis server URL without a database path (e.g. `redis://localhost:6379`)
    pub url: String,

    /// Redis database number (0-15)
    #[serde(default)]
    pub database: u8,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Retries for transient command failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay for exponential backoff between retries, in milliseconds
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            database: AREA_CACHE_DB,
            connection_timeout: 5,
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
        }
    }
}

impl CacheConfig {
    /// Area cache connection from environment variables
    pub fn from_env() -> Self {
        Self::from_env_with_db("REDIS_AREA_DB", AREA_CACHE_DB)
    }

    /// Verification store connection from environment variables
    pub fn verification_from_env() -> Self {
        Self::from_env_with_db("REDIS_VERIFICATION_DB", VERIFICATION_CACHE_DB)
    }

    fn from_env_with_db(db_var: &str, default_db: u8) -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            database: env_or(db_var, default_db).min(15),
            connection_timeout: env_or("REDIS_CONNECTION_TIMEOUT", defaults.connection_timeout),
            max_retries: env_or("REDIS_MAX_RETRIES", defaults.max_retries),
            retry_base_delay_ms: env_or("REDIS_RETRY_BASE_DELAY_MS", defaults.retry_base_delay_ms),
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the database number
    pub fn with_database(mut self, db: u8) -> Self {
        self.database = db.min(15);
        self
    }

    /// Full connection URL including the database path
    pub fn connection_url(&self) -> String {
        format!("{}/{}", self.url.trim_end_matches('/'), self.database)
    }
}

/// Region lookup cache settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AreaCacheConfig {
    /// TTL for `province_list` and `sub_area_{id}` entries, in seconds
    pub ttl_seconds: u64,
}

impl Default for AreaCacheConfig {
    fn default() -> Self {
        Self { ttl_seconds: 3600 }
    }
}

impl AreaCacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            ttl_seconds: env_or("AREA_CACHE_TTL_SECONDS", Self::default().ttl_seconds),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}
