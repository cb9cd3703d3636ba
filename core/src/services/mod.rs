//! Business services containing domain logic and use cases.

pub mod area;
pub mod cache;
pub mod verification;

// Re-export commonly used types
pub use area::{AreaService, AreaServiceConfig};
pub use cache::{CacheEntry, CacheServiceTrait, MockCacheService};
pub use verification::{
    CaptchaImage, CaptchaRendererTrait, DispatchStatus, GeneratedCaptcha, ImageChallenge,
    MockCaptchaRenderer,
    MockSmsService, SendCodeResult, SentSms, SmsServiceTrait, VerificationService,
    VerificationServiceConfig, VerifyCodeResult,
};
