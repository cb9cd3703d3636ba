//! Cache module for Redis-based caching
//!
//! This module provides the Redis client (retry logic, atomic take, guarded
//! pair writes) and the `CacheServiceTrait` implementation built on it.

pub mod cache_service;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use cache_service::RedisCacheService;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use mall_shared::config::CacheConfig;
