//! Trait for cache service integration

use async_trait::async_trait;

/// A value to store together with its lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: String,
    pub value: String,
    pub ttl_seconds: u64,
}

impl CacheEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>, ttl_seconds: u64) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ttl_seconds,
        }
    }
}

/// String key-value store with per-key expiry
#[async_trait]
pub trait CacheServiceTrait: Send + Sync {
    /// Read a value; expired or absent keys read as `None`
    async fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// Store a value that expires after `ttl_seconds`
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String>;

    /// Read and delete a value in one atomic step
    async fn take(&self, key: &str) -> Result<Option<String>, String>;

    /// Check if a key is present
    async fn exists(&self, key: &str) -> Result<bool, String>;

    /// Delete a key, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool, String>;

    /// Atomically store `guard` only if its key is absent and, only then, `entry`.
    ///
    /// Returns `false` without writing anything when the guard key exists.
    async fn set_pair_if_absent(&self, guard: &CacheEntry, entry: &CacheEntry) -> Result<bool, String>;
}
