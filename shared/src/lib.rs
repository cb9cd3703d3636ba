//! Shared utilities and common types for the mall backend
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Response codes and the JSON response envelope
//! - Utility functions (mobile number validation and masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AreaCacheConfig, CacheConfig, DatabaseConfig, DispatchMode, Environment,
    LogFormat, LoggingConfig, ServerConfig, SmsConfig, VerificationConfig,
};
pub use types::{JsonResponse, NoData, RetCode};
pub use utils::phone;
