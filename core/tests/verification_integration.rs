//! Integration tests for the verification flow through the public API

use std::sync::Arc;

use mall_core::domain::entities::verification_code::{image_code_key, send_flag_key, sms_code_key};
use mall_core::errors::{DomainError, VerificationError};
use mall_core::services::cache::{CacheServiceTrait, MockCacheService};
use mall_core::services::verification::{
    CaptchaImage, CaptchaRendererTrait, GeneratedCaptcha, MockSmsService, VerificationService,
    VerificationServiceConfig,
};

/// Renderer with a fixed answer and opaque image bytes
struct FixedAnswerRenderer;

impl CaptchaRendererTrait for FixedAnswerRenderer {
    fn generate(&self) -> Result<GeneratedCaptcha, String> {
        Ok(GeneratedCaptcha {
            answer: "K7QZ".to_string(),
            image: CaptchaImage {
                content_type: "image/png".to_string(),
                bytes: vec![0x89, b'P', b'N', b'G'],
            },
        })
    }
}

fn service() -> (
    VerificationService<MockSmsService, MockCacheService, FixedAnswerRenderer>,
    Arc<MockSmsService>,
    Arc<MockCacheService>,
) {
    let sms = Arc::new(MockSmsService::new(false));
    let cache = Arc::new(MockCacheService::new());
    let service = VerificationService::new(
        sms.clone(),
        cache.clone(),
        Arc::new(FixedAnswerRenderer),
        VerificationServiceConfig::default(),
    );
    (service, sms, cache)
}

#[tokio::test]
async fn test_full_registration_code_flow() {
    let (service, sms, cache) = service();
    let challenge_id = "3b241101-e2bb-4255-8caf-4136c566a962";
    let mobile = "13912345678";

    let challenge = service.issue_image_challenge(challenge_id).await.unwrap();
    assert_eq!(challenge.image.content_type, "image/png");
    let answer = cache.get(&image_code_key(challenge_id)).await.unwrap().unwrap();
    assert_eq!(answer, "K7QZ");

    let ack = service.send_sms_code(mobile, &answer, challenge_id).await.unwrap();
    assert_eq!(ack.resend_after_seconds, 60);

    let delivered = sms.get_sent_code(mobile).await.expect("code delivered");
    service.verify_sms_code(mobile, &delivered).await.unwrap();
}

#[tokio::test]
async fn test_documented_scenario() {
    let (service, _sms, cache) = service();
    cache.insert("img_u1", "7f3a", 300).await;

    service.send_sms_code("13800138000", "7F3A", "u1").await.unwrap();

    assert!(cache.exists(&sms_code_key("13800138000")).await.unwrap());
    assert!(cache.exists(&send_flag_key("13800138000")).await.unwrap());
    assert!(!cache.exists("img_u1").await.unwrap());

    cache.insert("img_u1", "7f3a", 300).await;
    let repeat = service.send_sms_code("13800138000", "7F3A", "u1").await;
    assert!(matches!(repeat, Err(DomainError::RateLimited { .. })));
}

#[tokio::test]
async fn test_challenge_is_single_use_across_mobiles() {
    let (service, _sms, cache) = service();
    cache.insert("img_shared", "QW12", 300).await;

    service.send_sms_code("13800138000", "QW12", "shared").await.unwrap();
    let second = service.send_sms_code("13900139000", "QW12", "shared").await;

    assert!(matches!(
        second,
        Err(DomainError::Verification(VerificationError::ImageCodeExpired))
    ));
}

#[tokio::test]
async fn test_uppercase_challenge_id_round_trip() {
    let (service, _sms, _cache) = service();
    let challenge_id = "3B241101-E2BB-4255-8CAF-4136C566A962";

    service.issue_image_challenge(challenge_id).await.unwrap();

    service.send_sms_code("13800138000", "k7qz", challenge_id).await.unwrap();
}
