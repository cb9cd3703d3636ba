//! Verification flow configuration
//!
//! Expiry windows for image challenges and SMS codes, the resend interval and
//! the way SMS dispatch is scheduled relative to the request.

use serde::{Deserialize, Serialize};

use super::env_or;

/// How the gateway call is scheduled once the code is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Await the gateway (bounded by the gateway timeout) before responding
    #[default]
    Inline,
    /// Spawn the gateway call and respond immediately
    Background,
}

impl std::str::FromStr for DispatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inline" => Ok(DispatchMode::Inline),
            "background" | "async" => Ok(DispatchMode::Background),
            _ => Err(format!("Invalid dispatch mode: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Lifetime of an image challenge answer
    pub image_code_expiry_seconds: u64,

    /// Lifetime of an issued SMS code
    pub sms_code_expiry_seconds: u64,

    /// Minimum interval between two SMS codes for one mobile
    pub send_interval_seconds: u64,

    /// Upper bound on a single gateway call
    pub gateway_timeout_seconds: u64,

    #[serde(default)]
    pub dispatch_mode: DispatchMode,

    /// Delete the SMS code after it verifies successfully
    #[serde(default)]
    pub consume_on_verify: bool,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            image_code_expiry_seconds: 300,
            sms_code_expiry_seconds: 300,
            send_interval_seconds: 60,
            gateway_timeout_seconds: 5,
            dispatch_mode: DispatchMode::Inline,
            consume_on_verify: false,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            image_code_expiry_seconds: env_or(
                "IMAGE_CODE_EXPIRY_SECONDS",
                defaults.image_code_expiry_seconds,
            ),
            sms_code_expiry_seconds: env_or("SMS_CODE_EXPIRY_SECONDS", defaults.sms_code_expiry_seconds),
            send_interval_seconds: env_or("SMS_SEND_INTERVAL_SECONDS", defaults.send_interval_seconds),
            gateway_timeout_seconds: env_or(
                "SMS_GATEWAY_TIMEOUT_SECONDS",
                defaults.gateway_timeout_seconds,
            ),
            dispatch_mode: env_or("SMS_DISPATCH_MODE", defaults.dispatch_mode),
            consume_on_verify: env_or("SMS_CODE_CONSUME_ON_VERIFY", defaults.consume_on_verify),
        }
    }

    /// SMS code lifetime in whole minutes, as quoted in the message template
    pub fn sms_code_expiry_minutes(&self) -> u64 {
        self.sms_code_expiry_seconds / 60
    }
}
