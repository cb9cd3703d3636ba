//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the mall backend,
//! following Clean Architecture principles. It provides concrete implementations
//! for the storage and gateway seams declared in `mall_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL connection pool and area repository using SQLx
//! - **Cache**: Redis client and the cache service built on it
//! - **SMS**: Cloopen template SMS gateway and a mock provider
//! - **Captcha**: PNG image challenges

// Re-export core types for convenience
pub use mall_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// SMS service module - External SMS providers
pub mod sms;

/// Cache module - Redis client and operations
pub mod cache;

/// Captcha module - image challenge rendering
pub mod captcha;

/// Configuration types used by infrastructure constructors
pub mod config {
    pub use mall_shared::config::{CacheConfig, DatabaseConfig, SmsConfig};
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// JSON encoding or decoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
