//! Configuration for the verification service

use mall_shared::{DispatchMode, VerificationConfig};
use std::time::Duration;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Seconds an image challenge answer stays valid
    pub image_code_expiry_seconds: u64,
    /// Seconds an SMS code stays valid
    pub sms_code_expiry_seconds: u64,
    /// Minimum seconds between two codes for one mobile
    pub send_interval_seconds: u64,
    /// Upper bound on one gateway call
    pub gateway_timeout: Duration,
    pub dispatch_mode: DispatchMode,
    /// Delete the SMS code once it verifies
    pub consume_on_verify: bool,
}

impl VerificationServiceConfig {
    /// Code lifetime in whole minutes, as quoted to the user
    pub fn sms_code_expiry_minutes(&self) -> u64 {
        self.sms_code_expiry_seconds / 60
    }
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self::from(&VerificationConfig::default())
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            image_code_expiry_seconds: config.image_code_expiry_seconds,
            sms_code_expiry_seconds: config.sms_code_expiry_seconds,
            send_interval_seconds: config.send_interval_seconds,
            gateway_timeout: Duration::from_secs(config.gateway_timeout_seconds),
            dispatch_mode: config.dispatch_mode,
            consume_on_verify: config.consume_on_verify,
        }
    }
}
