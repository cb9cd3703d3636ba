//! SMS Service Interface
//!
//! Template based providers substitute `datas` into a pre-registered message
//! template, so callers never send free text.

use async_trait::async_trait;

use crate::InfrastructureError;

/// SMS provider able to send a registered template
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send template `template_id` to `to`, filling its placeholders with `datas`
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the accepted message
    /// * `Err(InfrastructureError)` - Transport failure or a rejection by the provider
    async fn send_template_sms(
        &self,
        to: &str,
        datas: &[String],
        template_id: &str,
    ) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is available.
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}
