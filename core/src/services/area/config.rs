//! Configuration for the area service

use mall_shared::AreaCacheConfig;

/// Configuration for the area service
#[derive(Debug, Clone)]
pub struct AreaServiceConfig {
    /// Lifetime of cached area lists in seconds
    pub cache_ttl_seconds: u64,
}

impl Default for AreaServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: 3600,
        }
    }
}

impl From<&AreaCacheConfig> for AreaServiceConfig {
    fn from(config: &AreaCacheConfig) -> Self {
        Self {
            cache_ttl_seconds: config.ttl_seconds,
        }
    }
}
