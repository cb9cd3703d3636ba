//! Redis cache client implementation
//!
//! This module provides a Redis client with a shared multiplexed connection,
//! retry logic, and the cache operations the services need: plain get/set with
//! expiry, an atomic read-and-delete, and a guarded two-key write.

use once_cell::sync::Lazy;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult, Script};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::CacheConfig;
use crate::InfrastructureError;

/// Sets KEYS[1] only if absent; when that succeeds, also sets KEYS[2].
/// Returns 1 when both were written, 0 when KEYS[1] already existed.
static SET_PAIR_IF_ABSENT: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r"
if redis.call('SET', KEYS[1], ARGV[1], 'NX', 'EX', ARGV[2]) then
    redis.call('SET', KEYS[2], ARGV[3], 'EX', ARGV[4])
    return 1
end
return 0
",
    )
});

/// Redis cache client with retry logic
///
/// Cloning is cheap: clones share the multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Maximum number of attempts for operations
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Example
    /// ```no_run
    /// use mall_infra::config::CacheConfig;
    /// use mall_infra::cache::RedisClient;
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let config = CacheConfig::new("redis://localhost:6379").with_database(2);
    ///     let client = RedisClient::new(&config).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        let url = config.connection_url();
        info!(url = %mask_url(&url), "Creating Redis client");

        let client = Client::open(url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let max_retries = config.max_retries.max(1);
        let connect = Self::create_connection_with_retry(client, max_retries, config.retry_base_delay_ms);
        let connection = tokio::time::timeout(Duration::from_secs(config.connection_timeout.max(1)), connect)
            .await
            .map_err(|_| InfrastructureError::Config("Timed out connecting to Redis".to_string()))??;

        info!(database = config.database, "Redis client created successfully");

        Ok(Self {
            connection,
            max_retries,
            retry_delay_ms: config.retry_base_delay_ms,
        })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Set a value with expiration time
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!(key, expiry_seconds, "Setting key");

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            let value = value.to_string();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
        .map_err(|e| {
            error!(key, error = %e, "Failed to set key");
            InfrastructureError::Cache(e)
        })
    }

    /// Get a value from cache
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
        .map_err(|e| {
            error!(key, error = %e, "Failed to get key");
            InfrastructureError::Cache(e)
        })
    }

    /// Read and delete a key in one MULTI/EXEC transaction
    pub async fn take(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let (value, _deleted) = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();
                Box::pin(async move {
                    redis::pipe()
                        .atomic()
                        .get(&key)
                        .del(&key)
                        .query_async::<_, (Option<String>, i64)>(&mut conn)
                        .await
                })
            })
            .await
            .map_err(|e| {
                error!(key, error = %e, "Failed to take key");
                InfrastructureError::Cache(e)
            })?;
        Ok(value)
    }

    /// Delete a key from cache, returning whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let deleted = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await
            .map_err(|e| {
                error!(key, error = %e, "Failed to delete key");
                InfrastructureError::Cache(e)
            })?;
        Ok(deleted > 0)
    }

    /// Check if a key exists in cache
    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.exists::<_, bool>(key).await })
        })
        .await
        .map_err(|e| {
            error!(key, error = %e, "Failed to check key existence");
            InfrastructureError::Cache(e)
        })
    }

    /// Atomically write `guard_key` only if absent and, only then, `key`
    ///
    /// Returns `false` without writing when `guard_key` already exists. A retry
    /// after a write whose reply was lost reports `false` as well.
    pub async fn set_pair_if_absent(
        &self,
        guard_key: &str,
        guard_value: &str,
        guard_ttl_seconds: u64,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<bool, InfrastructureError> {
        let written = self
            .execute_with_retry(|mut conn| {
                let mut invocation = SET_PAIR_IF_ABSENT.key(guard_key);
                invocation
                    .key(key)
                    .arg(guard_value)
                    .arg(guard_ttl_seconds)
                    .arg(value)
                    .arg(ttl_seconds);
                Box::pin(async move { invocation.invoke_async::<_, i64>(&mut conn).await })
            })
            .await
            .map_err(|e| {
                error!(guard_key, key, error = %e, "Failed guarded write");
                InfrastructureError::Cache(e)
            })?;
        Ok(written == 1)
    }

    /// Get time-to-live for a key, `None` if missing or without expiry
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        let ttl = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();
                Box::pin(async move { conn.ttl::<_, i64>(key).await })
            })
            .await
            .map_err(InfrastructureError::Cache)?;
        Ok((ttl >= 0).then_some(ttl))
    }

    /// Check if the Redis connection is healthy
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await
            .map_err(|e| {
                error!("Redis health check failed: {}", e);
                InfrastructureError::Cache(e)
            })?;

        if response != "PONG" {
            warn!("Redis health check returned unexpected response: {}", response);
        }
        Ok(response == "PONG")
    }

    /// Execute a Redis operation with exponential-backoff retry on transient errors
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(
            MultiplexedConnection,
        ) -> std::pin::Pin<Box<dyn std::future::Future<Output = RedisResult<T>> + Send>>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            match operation(conn).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Check if a Redis error is transient and the operation should be retried
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError | redis::ErrorKind::BusyLoadingError | redis::ErrorKind::TryAgain
    )
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.find('@'), url.find("://")) {
        return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
    }
    url.to_string()
}
