//! SMS Gateway Module
//!
//! Template SMS delivery for verification codes. The Cloopen (CCP) REST
//! client is used in deployed environments; the mock provider logs messages
//! instead of sending them.
//!
//! The domain layer only sees [`SmsGatewayAdapter`], which implements
//! `mall_core`'s `SmsServiceTrait` on top of any [`SmsService`].

pub mod ccp;
pub mod gateway_adapter;
pub mod mock_sms;
pub mod sms_service;

pub use ccp::{CcpSmsService, CCP_SUCCESS_STATUS};
pub use gateway_adapter::SmsGatewayAdapter;
pub use mock_sms::MockSmsService;
pub use sms_service::SmsService;

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// `ccp` requires the account SID, token and app id. Missing credentials,
/// client construction failures and unknown provider names all fall back to
/// the mock provider so a development server still starts.
pub fn create_sms_service(config: &crate::config::SmsConfig) -> Box<dyn SmsService> {
    match config.provider.as_str() {
        "mock" => Box::new(MockSmsService::new()),
        "ccp" => {
            if !config.has_credentials() {
                tracing::warn!("CCP credentials are not configured, falling back to mock SMS service");
                return Box::new(MockSmsService::new());
            }

            match CcpSmsService::new(config) {
                Ok(service) => Box::new(service),
                Err(e) => {
                    tracing::error!("Failed to initialize CCP SMS service: {}", e);
                    tracing::warn!("Falling back to mock SMS service");
                    Box::new(MockSmsService::new())
                }
            }
        }
        _ => {
            tracing::warn!(
                "Unknown SMS provider '{}', using mock implementation",
                config.provider
            );
            Box::new(MockSmsService::new())
        }
    }
}
