//! Mock SMS Service Implementation
//!
//! Logs template messages instead of sending them. Used in development and
//! whenever the real gateway cannot be configured.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use mall_shared::phone::{is_valid_mobile, mask_phone_number};

use super::sms_service::SmsService;
use crate::InfrastructureError;

/// Mock SMS service for development and testing
#[derive(Clone, Default)]
pub struct MockSmsService {
    message_count: Arc<AtomicU64>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockSmsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of messages accepted so far
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_template_sms(
        &self,
        to: &str,
        datas: &[String],
        template_id: &str,
    ) -> Result<String, InfrastructureError> {
        let masked = mask_phone_number(to);

        if !is_valid_mobile(to) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid mobile number: {}",
                masked
            )));
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(phone = %masked, "Mock SMS service simulating failure");
            return Err(InfrastructureError::Sms(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        let message_id = format!("mock_{}_{}", chrono::Utc::now().timestamp_millis(), count);

        // Development only: the template data carries the code
        info!(
            target: "sms_service",
            provider = "mock",
            phone = %masked,
            template_id,
            datas = ?datas,
            message_id = %message_id,
            "Mock SMS sent"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
