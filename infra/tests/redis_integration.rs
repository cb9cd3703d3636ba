//! Integration tests for the Redis-backed verification store
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p mall_infra --test redis_integration -- --ignored

use std::sync::Arc;

use mall_core::domain::entities::verification_code::{image_code_key, send_flag_key, sms_code_key};
use mall_core::errors::{DomainError, VerificationError};
use mall_core::services::cache::CacheServiceTrait;
use mall_core::services::verification::{
    MockSmsService, VerificationService, VerificationServiceConfig,
};
use mall_infra::cache::{CacheConfig, RedisCacheService, RedisClient};
use mall_infra::captcha::PngCaptchaRenderer;

async fn redis_cache() -> Arc<RedisCacheService> {
    let config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    )
    .with_database(15);

    let client = RedisClient::new(&config).await.expect("Failed to connect to Redis");
    Arc::new(RedisCacheService::new(client))
}

async fn clear(cache: &RedisCacheService, challenge_id: &str, mobile: &str) {
    cache.delete(&image_code_key(challenge_id)).await.unwrap();
    cache.delete(&sms_code_key(mobile)).await.unwrap();
    cache.delete(&send_flag_key(mobile)).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_issue_send_and_throttle_against_redis() {
    let cache = redis_cache().await;
    let sms = Arc::new(MockSmsService::new(false));
    let service = VerificationService::new(
        sms.clone(),
        cache.clone(),
        Arc::new(PngCaptchaRenderer::new()),
        VerificationServiceConfig::default(),
    );
    let challenge_id = "6f1c2a8e-5b43-4c1e-9d7a-2f0e9b1c4d11";
    let mobile = "13700000001";
    clear(&cache, challenge_id, mobile).await;

    let challenge = service.issue_image_challenge(challenge_id).await.unwrap();
    assert_eq!(challenge.image.content_type, "image/png");

    let answer = cache.get(&image_code_key(challenge_id)).await.unwrap().unwrap();
    let ttl = cache.client().ttl(&image_code_key(challenge_id)).await.unwrap();
    assert!(matches!(ttl, Some(t) if t > 0 && t <= 300));

    service
        .send_sms_code(mobile, &answer.to_lowercase(), challenge_id)
        .await
        .unwrap();

    // Challenge is single use
    assert!(!cache.exists(&image_code_key(challenge_id)).await.unwrap());
    let code = cache.get(&sms_code_key(mobile)).await.unwrap().unwrap();
    assert_eq!(sms.get_sent_code(mobile).await, Some(code));
    assert!(cache.exists(&send_flag_key(mobile)).await.unwrap());

    service.issue_image_challenge(challenge_id).await.unwrap();
    let answer = cache.get(&image_code_key(challenge_id)).await.unwrap().unwrap();
    let err = service.send_sms_code(mobile, &answer, challenge_id).await.unwrap_err();
    assert!(matches!(err, DomainError::RateLimited { .. }));

    clear(&cache, challenge_id, mobile).await;
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_expired_challenge_against_redis() {
    let cache = redis_cache().await;
    let service = VerificationService::new(
        Arc::new(MockSmsService::new(false)),
        cache.clone(),
        Arc::new(PngCaptchaRenderer::new()),
        VerificationServiceConfig::default(),
    );
    let mobile = "13700000002";
    clear(&cache, "missing-challenge", mobile).await;

    let err = service
        .send_sms_code(mobile, "ABCD", "missing-challenge")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::ImageCodeExpired)
    ));
}
