//! HTTP route handlers
//!
//! - `GET /areas/` province list, or `?area_id=` for one area's children
//! - `GET /image_codes/{uuid}/` image challenge
//! - `GET /sms_codes/{mobile}/?image_code=&uuid=` SMS verification code
//! - `GET /health` liveness

pub mod areas;
pub mod health;
pub mod image_codes;
pub mod sms_codes;

use std::sync::Arc;

use mall_core::repositories::AreaRepository;
use mall_core::services::{
    AreaService, CacheServiceTrait, CaptchaRendererTrait, SmsServiceTrait, VerificationService,
};

/// Application state that holds shared services
///
/// `C` backs both the area cache and the verification store; in production
/// these are two instances pointing at different Redis databases.
pub struct AppState<R, C, S, G>
where
    R: AreaRepository,
    C: CacheServiceTrait,
    S: SmsServiceTrait + 'static,
    G: CaptchaRendererTrait,
{
    pub area_service: Arc<AreaService<R, C>>,
    pub verification_service: Arc<VerificationService<S, C, G>>,
}

impl<R, C, S, G> AppState<R, C, S, G>
where
    R: AreaRepository,
    C: CacheServiceTrait,
    S: SmsServiceTrait + 'static,
    G: CaptchaRendererTrait,
{
    pub fn new(
        area_service: Arc<AreaService<R, C>>,
        verification_service: Arc<VerificationService<S, C, G>>,
    ) -> Self {
        Self {
            area_service,
            verification_service,
        }
    }
}
