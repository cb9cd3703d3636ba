//! Domain-specific error types and error handling.

mod types;

pub use types::{extract_chinese_message, extract_english_message, VerificationError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message} | 参数格式错误")]
    Validation { message: String },

    #[error("Missing required parameter: {name} | 缺少必传参数")]
    MissingParameter { name: String },

    #[error("Resource not found: {resource} | 资源不存在")]
    NotFound { resource: String },

    #[error("Too many requests. Retry after {retry_after_seconds} seconds | 发送短信过于频繁")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Database error: {message} | 数据库错误")]
    Database { message: String },

    #[error("Cache error: {message} | 缓存服务错误")]
    Cache { message: String },

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error("Internal error: {message} | 服务器内部错误")]
    Internal { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;
