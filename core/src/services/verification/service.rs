//! Main verification service implementation

use chrono::Utc;
use constant_time_eq::constant_time_eq;
use mall_shared::phone::{is_valid_mobile, mask_phone_number};
use mall_shared::DispatchMode;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::entities::verification_code::{
    generate_sms_code, image_code_key, image_code_matches, is_valid_code_format, send_flag_key,
    sms_code_key, SEND_FLAG_MARKER,
};
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::services::cache::{CacheEntry, CacheServiceTrait};

use super::config::VerificationServiceConfig;
use super::traits::{CaptchaRendererTrait, SmsServiceTrait};
use super::types::{DispatchStatus, ImageChallenge, SendCodeResult, VerifyCodeResult};

/// Verification service for image challenges and SMS codes
pub struct VerificationService<S, C, G>
where
    S: SmsServiceTrait + 'static,
    C: CacheServiceTrait,
    G: CaptchaRendererTrait,
{
    /// SMS gateway for delivering codes
    sms_service: Arc<S>,
    /// Verification store for challenges, codes and throttle flags
    cache_service: Arc<C>,
    /// Renders challenge answers into images
    captcha_renderer: Arc<G>,
    config: VerificationServiceConfig,
}

impl<S, C, G> VerificationService<S, C, G>
where
    S: SmsServiceTrait + 'static,
    C: CacheServiceTrait,
    G: CaptchaRendererTrait,
{
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `sms_service` - SMS gateway implementation
    /// * `cache_service` - Verification store implementation
    /// * `captcha_renderer` - Captcha image renderer
    /// * `config` - Service configuration
    pub fn new(
        sms_service: Arc<S>,
        cache_service: Arc<C>,
        captcha_renderer: Arc<G>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            sms_service,
            cache_service,
            captcha_renderer,
            config,
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue a new image challenge under a client-chosen id
    ///
    /// Re-issuing for the same id replaces the previous answer.
    pub async fn issue_image_challenge(&self, challenge_id: &str) -> DomainResult<ImageChallenge> {
        let challenge_id = Uuid::parse_str(challenge_id.trim()).map_err(|_| DomainError::Validation {
            message: format!("Invalid challenge id: {}", challenge_id),
        })?;

        let captcha = self.captcha_renderer.generate().map_err(|e| DomainError::Internal {
            message: format!("Failed to render captcha: {}", e),
        })?;

        let key = image_code_key(&challenge_id.to_string());
        self.cache_service
            .set_with_expiry(&key, &captcha.answer, self.config.image_code_expiry_seconds)
            .await
            .map_err(|e| {
                tracing::error!(
                    challenge_id = %challenge_id,
                    error = %e,
                    event = "image_code_storage_failed",
                    "Failed to store image code"
                );
                DomainError::Cache {
                    message: format!("Failed to store image code: {}", e),
                }
            })?;

        tracing::debug!(challenge_id = %challenge_id, event = "image_code_issued", "Issued image challenge");

        Ok(ImageChallenge {
            challenge_id,
            image: captcha.image,
            expires_in_seconds: self.config.image_code_expiry_seconds,
        })
    }

    /// Issue an SMS code for a mobile number
    ///
    /// This method:
    /// 1. Validates the inputs
    /// 2. Rejects mobiles inside their resend interval
    /// 3. Consumes the image challenge (whatever the outcome)
    /// 4. Compares the challenge answer ignoring case
    /// 5. Generates a new code
    /// 6. Stores throttle flag and code together, only if no flag exists
    /// 7. Hands the code to the SMS gateway
    ///
    /// Gateway failures are logged and do not fail the call; the stored code
    /// and throttle flag stay in place.
    pub async fn send_sms_code(
        &self,
        mobile: &str,
        image_code: &str,
        challenge_id: &str,
    ) -> DomainResult<SendCodeResult> {
        let mobile = require("mobile", mobile)?;
        let image_code = require("image_code", image_code)?;
        let challenge_id = require("uuid", challenge_id)?;

        if !is_valid_mobile(mobile) {
            return Err(DomainError::Validation {
                message: format!("Invalid mobile number: {}", mask_phone_number(mobile)),
            });
        }
        let masked = mask_phone_number(mobile);

        // Checked before the challenge so a throttled request keeps its challenge
        let throttled = self
            .cache_service
            .exists(&send_flag_key(mobile))
            .await
            .map_err(cache_error)?;
        if throttled {
            tracing::warn!(phone = %masked, event = "sms_rate_limited", "SMS code requested inside resend interval");
            return Err(DomainError::RateLimited {
                retry_after_seconds: self.config.send_interval_seconds,
            });
        }

        let stored_answer = self
            .cache_service
            .take(&challenge_key(challenge_id))
            .await
            .map_err(cache_error)?
            .ok_or_else(|| {
                tracing::info!(phone = %masked, event = "image_code_expired", "Image challenge missing or expired");
                VerificationError::ImageCodeExpired
            })?;

        if !image_code_matches(&stored_answer, image_code) {
            tracing::info!(phone = %masked, event = "image_code_mismatch", "Image challenge answer rejected");
            return Err(VerificationError::ImageCodeMismatch.into());
        }

        let code = generate_sms_code();
        let guard = CacheEntry::new(
            send_flag_key(mobile),
            SEND_FLAG_MARKER,
            self.config.send_interval_seconds,
        );
        let entry = CacheEntry::new(sms_code_key(mobile), code.clone(), self.config.sms_code_expiry_seconds);

        let written = self
            .cache_service
            .set_pair_if_absent(&guard, &entry)
            .await
            .map_err(|e| {
                tracing::error!(phone = %masked, error = %e, event = "sms_code_storage_failed", "Failed to store SMS code");
                cache_error(e)
            })?;
        if !written {
            // A concurrent request for the same mobile stored its code first
            tracing::warn!(phone = %masked, event = "sms_rate_limited", "Lost race for resend interval");
            return Err(DomainError::RateLimited {
                retry_after_seconds: self.config.send_interval_seconds,
            });
        }

        tracing::info!(phone = %masked, event = "sms_code_issued", "Issued SMS verification code");

        let dispatch = self.dispatch(mobile, code).await;
        let resend_after_seconds = self.config.send_interval_seconds;

        Ok(SendCodeResult {
            mobile: mobile.to_string(),
            resend_after_seconds,
            next_resend_at: Utc::now() + chrono::Duration::seconds(resend_after_seconds as i64),
            dispatch,
        })
    }

    /// Check an SMS code submitted during registration
    pub async fn verify_sms_code(&self, mobile: &str, code: &str) -> DomainResult<VerifyCodeResult> {
        let mobile = require("mobile", mobile)?;
        let code = require("sms_code", code)?;
        let key = sms_code_key(mobile);

        // Malformed codes never reach the store
        if !is_valid_code_format(code) {
            tracing::info!(
                phone = %mask_phone_number(mobile),
                event = "sms_code_malformed",
                "SMS code rejected"
            );
            return Err(VerificationError::SmsCodeMismatch.into());
        }

        let stored = self
            .cache_service
            .get(&key)
            .await
            .map_err(cache_error)?
            .ok_or(VerificationError::SmsCodeExpired)?;

        if !constant_time_eq(stored.as_bytes(), code.as_bytes()) {
            tracing::info!(
                phone = %mask_phone_number(mobile),
                event = "sms_code_mismatch",
                "SMS code rejected"
            );
            return Err(VerificationError::SmsCodeMismatch.into());
        }

        let consumed = if self.config.consume_on_verify {
            self.cache_service.delete(&key).await.map_err(cache_error)?
        } else {
            false
        };

        tracing::info!(
            phone = %mask_phone_number(mobile),
            consumed,
            event = "sms_code_verified",
            "SMS code verified"
        );

        Ok(VerifyCodeResult { consumed })
    }

    async fn dispatch(&self, mobile: &str, code: String) -> DispatchStatus {
        let sms = Arc::clone(&self.sms_service);
        let mobile = mobile.to_string();
        let expiry_minutes = self.config.sms_code_expiry_minutes();
        let timeout = self.config.gateway_timeout;

        match self.config.dispatch_mode {
            DispatchMode::Inline => deliver(sms, mobile, code, expiry_minutes, timeout).await,
            DispatchMode::Background => {
                tokio::spawn(deliver(sms, mobile, code, expiry_minutes, timeout));
                DispatchStatus::Scheduled
            }
        }
    }
}

async fn deliver<S: SmsServiceTrait + ?Sized>(
    sms: Arc<S>,
    mobile: String,
    code: String,
    expiry_minutes: u64,
    timeout: Duration,
) -> DispatchStatus {
    let masked = mask_phone_number(&mobile);
    match tokio::time::timeout(timeout, sms.send_verification_code(&mobile, &code, expiry_minutes)).await {
        Ok(Ok(message_id)) => {
            tracing::info!(phone = %masked, message_id = %message_id, event = "sms_sent", "SMS code delivered to gateway");
            DispatchStatus::Delivered { message_id }
        }
        Ok(Err(reason)) => {
            tracing::error!(phone = %masked, error = %reason, event = "sms_send_failed", "SMS gateway rejected code");
            DispatchStatus::Failed { reason }
        }
        Err(_) => {
            tracing::error!(
                phone = %masked,
                timeout_secs = timeout.as_secs(),
                event = "sms_send_timeout",
                "SMS gateway timed out"
            );
            DispatchStatus::TimedOut
        }
    }
}

fn require<'a>(name: &str, value: &'a str) -> DomainResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::MissingParameter {
            name: name.to_string(),
        });
    }
    Ok(value)
}

/// Store key for a challenge id; UUID spellings all map to the hyphenated lowercase form
fn challenge_key(challenge_id: &str) -> String {
    match Uuid::parse_str(challenge_id) {
        Ok(id) => image_code_key(&id.to_string()),
        Err(_) => image_code_key(challenge_id),
    }
}

fn cache_error(e: String) -> DomainError {
    DomainError::Cache { message: e }
}
