//! Unit tests for verification service

use std::sync::Arc;
use std::time::Duration;

use mall_shared::DispatchMode;

use crate::domain::entities::verification_code::{
    image_code_key, send_flag_key, sms_code_key, CODE_LENGTH, IMAGE_CODE_LENGTH,
};
use crate::errors::{DomainError, VerificationError};
use crate::services::cache::{CacheServiceTrait, MockCacheService};
use crate::services::verification::{
    DispatchStatus, MockCaptchaRenderer, MockSmsService, VerificationService,
    VerificationServiceConfig,
};

const MOBILE: &str = "13800138000";

type TestService = VerificationService<MockSmsService, MockCacheService, MockCaptchaRenderer>;

fn build(
    sms: MockSmsService,
    config: VerificationServiceConfig,
) -> (TestService, Arc<MockSmsService>, Arc<MockCacheService>) {
    let sms = Arc::new(sms);
    let cache = Arc::new(MockCacheService::new());
    let service = VerificationService::new(
        sms.clone(),
        cache.clone(),
        Arc::new(MockCaptchaRenderer::default()),
        config,
    );
    (service, sms, cache)
}

fn setup() -> (TestService, Arc<MockSmsService>, Arc<MockCacheService>) {
    build(MockSmsService::new(false), VerificationServiceConfig::default())
}

#[tokio::test]
async fn test_send_sms_code_success() {
    let (service, sms, cache) = setup();
    cache.insert(&image_code_key("u1"), "7f3a", 300).await;

    let result = service.send_sms_code(MOBILE, "7F3A", "u1").await.unwrap();

    assert_eq!(result.mobile, MOBILE);
    assert_eq!(result.resend_after_seconds, 60);
    assert!(matches!(result.dispatch, DispatchStatus::Delivered { .. }));

    let stored = cache.peek(&sms_code_key(MOBILE)).await.expect("code stored");
    assert_eq!(stored.len(), CODE_LENGTH);
    assert!(stored.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(cache.ttl_of(&sms_code_key(MOBILE)).await, Some(300));

    assert_eq!(cache.peek(&send_flag_key(MOBILE)).await, Some("1".to_string()));
    assert_eq!(cache.ttl_of(&send_flag_key(MOBILE)).await, Some(60));

    assert!(cache.peek(&image_code_key("u1")).await.is_none());

    let sent = sms.sent_messages.lock().await.clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].code, stored);
    assert_eq!(sent[0].expiry_minutes, 5);
}

#[tokio::test]
async fn test_send_sms_code_throttled_keeps_challenge() {
    let (service, sms, cache) = setup();
    cache.insert(&send_flag_key(MOBILE), "1", 60).await;
    cache.insert(&image_code_key("u2"), "AB12", 300).await;

    let result = service.send_sms_code(MOBILE, "AB12", "u2").await;

    assert!(matches!(result, Err(DomainError::RateLimited { retry_after_seconds: 60 })));
    assert_eq!(cache.peek(&image_code_key("u2")).await, Some("AB12".to_string()));
    assert!(cache.peek(&sms_code_key(MOBILE)).await.is_none());
    assert_eq!(cache.write_count(), 0);
    assert_eq!(sms.sent_count().await, 0);
}

#[tokio::test]
async fn test_repeat_request_is_throttled_without_mutation() {
    let (service, _sms, cache) = setup();
    cache.insert(&image_code_key("u1"), "7f3a", 300).await;
    service.send_sms_code(MOBILE, "7F3A", "u1").await.unwrap();
    let code = cache.peek(&sms_code_key(MOBILE)).await;
    let writes = cache.write_count();

    cache.insert(&image_code_key("u1"), "7f3a", 300).await;
    let result = service.send_sms_code(MOBILE, "7F3A", "u1").await;

    assert!(matches!(result, Err(DomainError::RateLimited { .. })));
    assert_eq!(cache.peek(&sms_code_key(MOBILE)).await, code);
    assert_eq!(cache.write_count(), writes);
}

#[tokio::test]
async fn test_missing_challenge() {
    let (service, _sms, cache) = setup();

    let result = service.send_sms_code(MOBILE, "AB12", "nope").await;

    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::ImageCodeExpired))
    ));
    assert!(!cache.exists(&send_flag_key(MOBILE)).await.unwrap());
}

#[tokio::test]
async fn test_wrong_answer_consumes_challenge() {
    let (service, _sms, cache) = setup();
    cache.insert(&image_code_key("u3"), "AB12", 300).await;

    let first = service.send_sms_code(MOBILE, "ZZZZ", "u3").await;
    assert!(matches!(
        first,
        Err(DomainError::Verification(VerificationError::ImageCodeMismatch))
    ));

    // Correct answer on retry is too late: the challenge is gone
    let second = service.send_sms_code(MOBILE, "AB12", "u3").await;
    assert!(matches!(
        second,
        Err(DomainError::Verification(VerificationError::ImageCodeExpired))
    ));
    assert!(cache.peek(&sms_code_key(MOBILE)).await.is_none());
}

#[tokio::test]
async fn test_answer_is_case_insensitive() {
    let (service, _sms, cache) = setup();
    cache.insert(&image_code_key("u4"), "AB12", 300).await;

    assert!(service.send_sms_code(MOBILE, "ab12", "u4").await.is_ok());
}

#[tokio::test]
async fn test_missing_parameters() {
    let (service, _sms, _cache) = setup();

    for (mobile, image_code, uuid, name) in [
        ("", "AB12", "u1", "mobile"),
        (MOBILE, "  ", "u1", "image_code"),
        (MOBILE, "AB12", "", "uuid"),
    ] {
        match service.send_sms_code(mobile, image_code, uuid).await {
            Err(DomainError::MissingParameter { name: missing }) => assert_eq!(missing, name),
            other => panic!("Expected missing parameter error, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_malformed_mobile() {
    let (service, _sms, cache) = setup();
    cache.insert(&image_code_key("u1"), "AB12", 300).await;

    for mobile in ["12800138000", "1380013800", "+8613800138000"] {
        let result = service.send_sms_code(mobile, "AB12", "u1").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
    // Validation runs before the challenge is touched
    assert!(cache.peek(&image_code_key("u1")).await.is_some());
}

#[tokio::test]
async fn test_gateway_failure_keeps_code() {
    let (service, _sms, cache) = build(MockSmsService::new(true), VerificationServiceConfig::default());
    cache.insert(&image_code_key("u1"), "7f3a", 300).await;

    let result = service.send_sms_code(MOBILE, "7f3a", "u1").await.unwrap();

    assert!(matches!(result.dispatch, DispatchStatus::Failed { .. }));
    assert!(cache.peek(&sms_code_key(MOBILE)).await.is_some());
    assert!(cache.peek(&send_flag_key(MOBILE)).await.is_some());
}

#[tokio::test]
async fn test_gateway_timeout_keeps_code() {
    let config = VerificationServiceConfig {
        gateway_timeout: Duration::from_millis(20),
        ..Default::default()
    };
    let sms = MockSmsService::new(false).with_delay(Duration::from_millis(500));
    let (service, sms, cache) = build(sms, config);
    cache.insert(&image_code_key("u1"), "7f3a", 300).await;

    let result = service.send_sms_code(MOBILE, "7f3a", "u1").await.unwrap();

    assert_eq!(result.dispatch, DispatchStatus::TimedOut);
    assert!(cache.peek(&sms_code_key(MOBILE)).await.is_some());
    assert_eq!(sms.sent_count().await, 0);
}

#[tokio::test]
async fn test_background_dispatch() {
    let config = VerificationServiceConfig {
        dispatch_mode: DispatchMode::Background,
        ..Default::default()
    };
    let (service, sms, cache) = build(MockSmsService::new(false), config);
    cache.insert(&image_code_key("u1"), "7f3a", 300).await;

    let result = service.send_sms_code(MOBILE, "7f3a", "u1").await.unwrap();
    assert_eq!(result.dispatch, DispatchStatus::Scheduled);

    for _ in 0..50 {
        if sms.sent_count().await > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(
        sms.get_sent_code(MOBILE).await,
        cache.peek(&sms_code_key(MOBILE)).await
    );
}

#[tokio::test]
async fn test_cache_failure_maps_to_cache_error() {
    let (service, _sms, cache) = setup();
    cache.insert(&image_code_key("u1"), "7f3a", 300).await;
    cache.set_fail_writes(true);

    let result = service.send_sms_code(MOBILE, "7f3a", "u1").await;

    assert!(matches!(result, Err(DomainError::Cache { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_single_success() {
    let (service, sms, cache) = setup();
    let service = Arc::new(service);
    for i in 0..8 {
        cache.insert(&image_code_key(&format!("c{}", i)), "AB12", 300).await;
    }

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move { service.send_sms_code(MOBILE, "AB12", &format!("c{}", i)).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(DomainError::RateLimited { .. }) => {}
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(sms.sent_count().await, 1);
}

#[tokio::test]
async fn test_verify_sms_code() {
    let (service, _sms, cache) = setup();
    cache.insert(&sms_code_key(MOBILE), "012345", 300).await;

    assert!(matches!(
        service.verify_sms_code(MOBILE, "999999").await,
        Err(DomainError::Verification(VerificationError::SmsCodeMismatch))
    ));

    let result = service.verify_sms_code(MOBILE, "012345").await.unwrap();
    assert!(!result.consumed);
    // Default keeps the code, so a second verification also passes
    assert!(service.verify_sms_code(MOBILE, "012345").await.is_ok());
}

#[tokio::test]
async fn test_verify_sms_code_expired() {
    let (service, _sms, _cache) = setup();

    assert!(matches!(
        service.verify_sms_code(MOBILE, "012345").await,
        Err(DomainError::Verification(VerificationError::SmsCodeExpired))
    ));
}

#[tokio::test]
async fn test_verify_sms_code_consumes_when_configured() {
    let config = VerificationServiceConfig {
        consume_on_verify: true,
        ..Default::default()
    };
    let (service, _sms, cache) = build(MockSmsService::new(false), config);
    cache.insert(&sms_code_key(MOBILE), "012345", 300).await;

    let result = service.verify_sms_code(MOBILE, "012345").await.unwrap();

    assert!(result.consumed);
    assert!(matches!(
        service.verify_sms_code(MOBILE, "012345").await,
        Err(DomainError::Verification(VerificationError::SmsCodeExpired))
    ));
}

#[tokio::test]
async fn test_issue_image_challenge() {
    let (service, _sms, cache) = setup();
    let id = "6f1c7b2e-3d4a-4e5f-8a9b-0c1d2e3f4a5b";

    let challenge = service.issue_image_challenge(id).await.unwrap();

    assert_eq!(challenge.challenge_id.to_string(), id);
    assert_eq!(challenge.expires_in_seconds, 300);
    let answer = cache.peek(&image_code_key(id)).await.expect("answer stored");
    assert_eq!(answer.len(), IMAGE_CODE_LENGTH);
    // The mock renderer echoes the answer
    assert_eq!(challenge.image.bytes, answer.as_bytes());
    assert_eq!(challenge.image.content_type, "text/plain");
    assert_eq!(cache.ttl_of(&image_code_key(id)).await, Some(300));
}

#[tokio::test]
async fn test_issue_image_challenge_rejects_non_uuid() {
    let (service, _sms, cache) = setup();

    let result = service.issue_image_challenge("not-a-uuid").await;

    assert!(matches!(result, Err(DomainError::Validation { .. })));
    assert_eq!(cache.write_count(), 0);
}

#[tokio::test]
async fn test_issued_challenge_gates_sms_code() {
    let (service, _sms, cache) = setup();
    let id = "0b7e3c59-92f4-4c57-a1a6-5d8c2b9e4f10";

    service.issue_image_challenge(id).await.unwrap();
    let answer = cache.peek(&image_code_key(id)).await.unwrap();

    let result = service
        .send_sms_code(MOBILE, &answer.to_lowercase(), id)
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_non_canonical_challenge_ids_gate_sms_code() {
    let ids = [
        "0B7E3C59-92F4-4C57-A1A6-5D8C2B9E4F10",
        "0b7e3c5992f44c57a1a65d8c2b9e4f10",
        " 0B7E3C59-92f4-4c57-A1A6-5d8c2b9e4f10 ",
    ];

    for (i, id) in ids.into_iter().enumerate() {
        let (service, _sms, cache) = setup();
        let mobile = format!("1380013800{}", i);

        let challenge = service.issue_image_challenge(id).await.unwrap();
        let canonical = challenge.challenge_id.to_string();
        assert_eq!(canonical, "0b7e3c59-92f4-4c57-a1a6-5d8c2b9e4f10");
        let answer = cache.peek(&image_code_key(&canonical)).await.unwrap();

        let result = service.send_sms_code(&mobile, &answer, id).await;
        assert!(result.is_ok(), "id {:?} failed: {:?}", id, result);
        assert!(cache.peek(&image_code_key(&canonical)).await.is_none());
    }
}

#[tokio::test]
async fn test_issue_uses_renderer_answer() {
    let sms = Arc::new(MockSmsService::new(false));
    let cache = Arc::new(MockCacheService::new());
    let service = VerificationService::new(
        sms,
        cache.clone(),
        Arc::new(MockCaptchaRenderer::with_answer("K7QZ")),
        VerificationServiceConfig::default(),
    );
    let id = "6f1c7b2e-3d4a-4e5f-8a9b-0c1d2e3f4a5b";

    service.issue_image_challenge(id).await.unwrap();

    assert_eq!(cache.peek(&image_code_key(id)).await, Some("K7QZ".to_string()));
    assert!(service.send_sms_code(MOBILE, "k7qz", id).await.is_ok());
}

#[tokio::test]
async fn test_issue_render_failure_writes_nothing() {
    let service: TestService = VerificationService::new(
        Arc::new(MockSmsService::new(false)),
        Arc::new(MockCacheService::new()),
        Arc::new(MockCaptchaRenderer {
            should_fail: true,
            ..Default::default()
        }),
        VerificationServiceConfig::default(),
    );

    let result = service
        .issue_image_challenge("6f1c7b2e-3d4a-4e5f-8a9b-0c1d2e3f4a5b")
        .await;

    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_verify_rejects_malformed_code_without_lookup() {
    let (service, _sms, cache) = setup();
    cache.insert(&sms_code_key(MOBILE), "012345", 300).await;
    cache.set_fail_reads(true);

    for code in ["12345", "1234567", "01234a", "０１２３４５"] {
        assert!(matches!(
            service.verify_sms_code(MOBILE, code).await,
            Err(DomainError::Verification(VerificationError::SmsCodeMismatch))
        ));
    }
}
