//! SMS gateway configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Cloopen template SMS account and provider selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Provider name: `ccp` or `mock`
    pub provider: String,

    /// Main account SID
    #[serde(default)]
    pub account_sid: String,

    /// Main account token
    #[serde(default, skip_serializing)]
    pub auth_token: String,

    /// Application id the templates belong to
    #[serde(default)]
    pub app_id: String,

    /// REST host (`app.cloopen.com` in production)
    pub server_ip: String,

    pub server_port: u16,

    /// REST API version path segment
    pub soft_version: String,

    /// Template used for verification codes
    pub template_id: String,

    /// HTTP client timeout in seconds
    pub request_timeout: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            account_sid: String::new(),
            auth_token: String::new(),
            app_id: String::new(),
            server_ip: String::from("sandboxapp.cloopen.com"),
            server_port: 8883,
            soft_version: String::from("2013-12-26"),
            template_id: String::from("1"),
            request_timeout: 10,
        }
    }
}

impl SmsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("SMS_PROVIDER").unwrap_or(defaults.provider),
            account_sid: std::env::var("CCP_ACCOUNT_SID").unwrap_or_default(),
            auth_token: std::env::var("CCP_AUTH_TOKEN").unwrap_or_default(),
            app_id: std::env::var("CCP_APP_ID").unwrap_or_default(),
            server_ip: std::env::var("CCP_SERVER_IP").unwrap_or(defaults.server_ip),
            server_port: env_or("CCP_SERVER_PORT", defaults.server_port),
            soft_version: std::env::var("CCP_SOFT_VERSION").unwrap_or(defaults.soft_version),
            template_id: std::env::var("SMS_TEMPLATE_ID").unwrap_or(defaults.template_id),
            request_timeout: env_or("SMS_REQUEST_TIMEOUT", defaults.request_timeout),
        }
    }

    /// Check that the account credentials needed by the REST provider are set
    pub fn has_credentials(&self) -> bool {
        !self.account_sid.is_empty() && !self.auth_token.is_empty() && !self.app_id.is_empty()
    }
}
