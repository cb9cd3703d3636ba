//! Shared fixtures for HTTP tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;

use mall_api::AppState;
use mall_core::repositories::MockAreaRepository;
use mall_core::services::{
    AreaService, AreaServiceConfig, MockCacheService, MockCaptchaRenderer, MockSmsService,
    VerificationService, VerificationServiceConfig,
};

pub type TestState =
    AppState<MockAreaRepository, MockCacheService, MockSmsService, MockCaptchaRenderer>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub repository: Arc<MockAreaRepository>,
    pub area_cache: Arc<MockCacheService>,
    pub verification_cache: Arc<MockCacheService>,
    pub sms: Arc<MockSmsService>,
}

pub fn context() -> TestContext {
    context_with_renderer(MockCaptchaRenderer::default())
}

pub fn context_with_renderer(renderer: MockCaptchaRenderer) -> TestContext {
    let repository = Arc::new(MockAreaRepository::with_sample_data());
    let area_cache = Arc::new(MockCacheService::new());
    let verification_cache = Arc::new(MockCacheService::new());
    let sms = Arc::new(MockSmsService::new(false));

    let area_service = Arc::new(AreaService::new(
        repository.clone(),
        area_cache.clone(),
        AreaServiceConfig::default(),
    ));
    let verification_service = Arc::new(VerificationService::new(
        sms.clone(),
        verification_cache.clone(),
        Arc::new(renderer),
        VerificationServiceConfig::default(),
    ));

    TestContext {
        state: web::Data::new(AppState::new(area_service, verification_service)),
        repository,
        area_cache,
        verification_cache,
        sms,
    }
}
