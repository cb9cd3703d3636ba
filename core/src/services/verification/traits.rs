//! Traits for SMS gateway and captcha rendering integration

use async_trait::async_trait;

/// Trait for SMS service integration
#[async_trait]
pub trait SmsServiceTrait: Send + Sync {
    /// Send a verification code via SMS, returning the provider's message id
    ///
    /// `expiry_minutes` is quoted in the message so the user knows how long
    /// the code stays valid.
    async fn send_verification_code(
        &self,
        mobile: &str,
        code: &str,
        expiry_minutes: u64,
    ) -> Result<String, String>;
}

/// Rendered challenge image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptchaImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A freshly drawn challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCaptcha {
    /// Text the user has to read back
    pub answer: String,
    pub image: CaptchaImage,
}

/// Picks a random challenge answer and draws it as an image a human can read
///
/// The answer must not be recoverable from the image bytes by a machine.
pub trait CaptchaRendererTrait: Send + Sync {
    fn generate(&self) -> Result<GeneratedCaptcha, String>;
}
