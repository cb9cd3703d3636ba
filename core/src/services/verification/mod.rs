//! Verification service module for image challenges and SMS codes
//!
//! This module provides the verification code workflow:
//! - Image challenge issuance for a client-chosen challenge id
//! - SMS code issuance gated by the image challenge and a resend throttle
//! - SMS code verification for the registration flow
//! - Integration with SMS gateway, cache and captcha rendering services

mod config;
mod mock;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use mock::{MockCaptchaRenderer, MockSmsService, SentSms};
pub use service::VerificationService;
pub use traits::{CaptchaImage, CaptchaRendererTrait, GeneratedCaptcha, SmsServiceTrait};
pub use types::{DispatchStatus, ImageChallenge, SendCodeResult, VerifyCodeResult};
