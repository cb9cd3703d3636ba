//! Redis-backed implementation of the core cache seam
//!
//! One instance serves one Redis database: the area cache and the
//! verification store are separate instances over separate connections.

use async_trait::async_trait;
use mall_core::services::cache::{CacheEntry, CacheServiceTrait};

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Cache service adapter over `RedisClient`
#[derive(Clone)]
pub struct RedisCacheService {
    redis_client: RedisClient,
}

impl RedisCacheService {
    /// Create a new cache service
    ///
    /// # Example
    /// ```no_run
    /// use mall_infra::cache::{RedisCacheService, RedisClient};
    ///
    /// fn create_service(redis_client: RedisClient) -> RedisCacheService {
    ///     RedisCacheService::new(redis_client)
    /// }
    /// ```
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }

    /// Underlying client, for health checks
    pub fn client(&self) -> &RedisClient {
        &self.redis_client
    }
}

fn to_message(e: InfrastructureError) -> String {
    e.to_string()
}

#[async_trait]
impl CacheServiceTrait for RedisCacheService {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.redis_client.get(key).await.map_err(to_message)
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        self.redis_client
            .set_with_expiry(key, value, ttl_seconds)
            .await
            .map_err(to_message)
    }

    async fn take(&self, key: &str) -> Result<Option<String>, String> {
        self.redis_client.take(key).await.map_err(to_message)
    }

    async fn exists(&self, key: &str) -> Result<bool, String> {
        self.redis_client.exists(key).await.map_err(to_message)
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        self.redis_client.delete(key).await.map_err(to_message)
    }

    async fn set_pair_if_absent(&self, guard: &CacheEntry, entry: &CacheEntry) -> Result<bool, String> {
        self.redis_client
            .set_pair_if_absent(
                &guard.key,
                &guard.value,
                guard.ttl_seconds,
                &entry.key,
                &entry.value,
                entry.ttl_seconds,
            )
            .await
            .map_err(to_message)
    }
}
