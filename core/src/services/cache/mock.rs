//! In-memory cache service for tests and local development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::traits::{CacheEntry, CacheServiceTrait};

#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    ttl_seconds: u64,
    expires_at: Instant,
}

impl StoredValue {
    fn new(value: &str, ttl_seconds: u64) -> Self {
        Self {
            value: value.to_string(),
            ttl_seconds,
            expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
        }
    }

    fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Mock cache keeping values and their TTLs in a map
///
/// All operations take the same lock, so `take` and `set_pair_if_absent`
/// are atomic with respect to each other just like the Redis implementation.
pub struct MockCacheService {
    entries: Arc<Mutex<HashMap<String, StoredValue>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MockCacheService {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    /// Make reads (`get`, `take`, `exists`) fail
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make writes (`set_with_expiry`, `delete`, `set_pair_if_absent`) fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seed a value directly, bypassing failure switches and counters
    pub async fn insert(&self, key: &str, value: &str, ttl_seconds: u64) {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), StoredValue::new(value, ttl_seconds));
    }

    /// Current live value, bypassing failure switches
    pub async fn peek(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().await;
        entries.get(key).filter(|v| v.is_live()).map(|v| v.value.clone())
    }

    /// TTL the live value was stored with
    pub async fn ttl_of(&self, key: &str) -> Option<u64> {
        let entries = self.entries.lock().await;
        entries.get(key).filter(|v| v.is_live()).map(|v| v.ttl_seconds)
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_read(&self) -> Result<(), String> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err("Cache service error".to_string());
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), String> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err("Cache service error".to_string());
        }
        Ok(())
    }
}

impl Default for MockCacheService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheServiceTrait for MockCacheService {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.check_read()?;
        Ok(self.peek(key).await)
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        self.check_write()?;
        self.insert(key, value, ttl_seconds).await;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn take(&self, key: &str) -> Result<Option<String>, String> {
        self.check_read()?;
        let mut entries = self.entries.lock().await;
        Ok(entries.remove(key).filter(|v| v.is_live()).map(|v| v.value))
    }

    async fn exists(&self, key: &str) -> Result<bool, String> {
        self.check_read()?;
        Ok(self.peek(key).await.is_some())
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        self.check_write()?;
        let mut entries = self.entries.lock().await;
        Ok(entries.remove(key).map(|v| v.is_live()).unwrap_or(false))
    }

    async fn set_pair_if_absent(&self, guard: &CacheEntry, entry: &CacheEntry) -> Result<bool, String> {
        self.check_write()?;
        let mut entries = self.entries.lock().await;
        if entries.get(&guard.key).is_some_and(|v| v.is_live()) {
            return Ok(false);
        }
        entries.insert(guard.key.clone(), StoredValue::new(&guard.value, guard.ttl_seconds));
        entries.insert(entry.key.clone(), StoredValue::new(&entry.value, entry.ttl_seconds));
        self.writes.fetch_add(2, Ordering::SeqCst);
        Ok(true)
    }
}
