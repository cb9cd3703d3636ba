//! Verification error types with bilingual messages (English and Chinese)

use thiserror::Error;

/// Failures of image challenge and SMS code checks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Image code expired or does not exist | 图形验证码失效")]
    ImageCodeExpired,

    #[error("Image code is incorrect | 输入图形验证码有误")]
    ImageCodeMismatch,

    #[error("SMS code expired or does not exist | 短信验证码已过期")]
    SmsCodeExpired,

    #[error("SMS code is incorrect | 输入短信验证码有误")]
    SmsCodeMismatch,
}

impl VerificationError {
    /// Whether the failure concerns the image challenge rather than the SMS code
    pub fn is_image_code(&self) -> bool {
        matches!(
            self,
            VerificationError::ImageCodeExpired | VerificationError::ImageCodeMismatch
        )
    }
}

/// Helper function to extract English message from bilingual error
pub fn extract_english_message(message: &str) -> &str {
    message.split(" | ").next().unwrap_or(message)
}

/// Helper function to extract Chinese message from bilingual error
pub fn extract_chinese_message(message: &str) -> &str {
    message.split(" | ").nth(1).unwrap_or(message)
}
