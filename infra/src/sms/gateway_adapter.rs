//! Adapter exposing an infrastructure SMS provider as the domain SMS gateway

use async_trait::async_trait;
use std::sync::Arc;

use mall_core::services::verification::SmsServiceTrait;

use super::sms_service::SmsService;

/// Sends verification codes through a template provider.
///
/// The template receives `[code, expiry_minutes]`.
pub struct SmsGatewayAdapter {
    inner: Arc<dyn SmsService>,
    template_id: String,
}

impl SmsGatewayAdapter {
    pub fn new(inner: Arc<dyn SmsService>, template_id: impl Into<String>) -> Self {
        Self {
            inner,
            template_id: template_id.into(),
        }
    }

    pub fn from_boxed(inner: Box<dyn SmsService>, template_id: impl Into<String>) -> Self {
        Self::new(Arc::from(inner), template_id)
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl SmsServiceTrait for SmsGatewayAdapter {
    async fn send_verification_code(
        &self,
        mobile: &str,
        code: &str,
        expiry_minutes: u64,
    ) -> Result<String, String> {
        let datas = [code.to_string(), expiry_minutes.to_string()];
        self.inner
            .send_template_sms(mobile, &datas, &self.template_id)
            .await
            .map_err(|e| e.to_string())
    }
}
