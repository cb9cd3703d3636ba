//! Types for verification service results

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::traits::CaptchaImage;

/// What happened to the gateway call for an issued code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchStatus {
    /// Gateway accepted the message
    Delivered { message_id: String },
    /// Gateway rejected the message or the call failed
    Failed { reason: String },
    /// Gateway did not answer within the timeout
    TimedOut,
    /// Handed to a background task
    Scheduled,
}

/// Result of issuing an SMS code; never carries the code itself
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    pub mobile: String,
    /// Seconds until another code may be requested
    pub resend_after_seconds: u64,
    /// When the user can request another code
    pub next_resend_at: DateTime<Utc>,
    pub dispatch: DispatchStatus,
}

/// Result of verifying an SMS code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCodeResult {
    /// Whether the stored code was deleted after matching
    pub consumed: bool,
}

/// A freshly issued image challenge
#[derive(Debug, Clone)]
pub struct ImageChallenge {
    pub challenge_id: Uuid,
    pub image: CaptchaImage,
    pub expires_in_seconds: u64,
}
