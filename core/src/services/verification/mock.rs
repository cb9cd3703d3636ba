//! Mock SMS gateway and captcha renderer for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::entities::verification_code::generate_image_code;

use super::traits::{CaptchaImage, CaptchaRendererTrait, GeneratedCaptcha, SmsServiceTrait};

/// One message handed to the mock gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub mobile: String,
    pub code: String,
    pub expiry_minutes: u64,
}

/// Mock SMS service recording every message it is asked to send
pub struct MockSmsService {
    pub sent_messages: Arc<Mutex<Vec<SentSms>>>,
    should_fail: AtomicBool,
    delay: Option<Duration>,
}

impl MockSmsService {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_messages: Arc::new(Mutex::new(Vec::new())),
            should_fail: AtomicBool::new(should_fail),
            delay: None,
        }
    }

    /// Wait this long before answering, to exercise timeouts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Last code sent to a mobile number
    pub async fn get_sent_code(&self, mobile: &str) -> Option<String> {
        self.sent_messages
            .lock()
            .await
            .iter()
            .rev()
            .find(|m| m.mobile == mobile)
            .map(|m| m.code.clone())
    }

    pub async fn sent_count(&self) -> usize {
        self.sent_messages.lock().await.len()
    }
}

#[async_trait]
impl SmsServiceTrait for MockSmsService {
    async fn send_verification_code(
        &self,
        mobile: &str,
        code: &str,
        expiry_minutes: u64,
    ) -> Result<String, String> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("SMS service error".to_string());
        }
        let mut sent = self.sent_messages.lock().await;
        sent.push(SentSms {
            mobile: mobile.to_string(),
            code: code.to_string(),
            expiry_minutes,
        });
        Ok(format!("mock-msg-{}", sent.len()))
    }
}

/// Renderer that returns the answer as plain text
#[derive(Debug, Default)]
pub struct MockCaptchaRenderer {
    pub should_fail: bool,
    /// Fixed answer; a random one is drawn when unset
    pub answer: Option<String>,
}

impl MockCaptchaRenderer {
    pub fn with_answer(answer: &str) -> Self {
        Self {
            should_fail: false,
            answer: Some(answer.to_string()),
        }
    }
}

impl CaptchaRendererTrait for MockCaptchaRenderer {
    fn generate(&self) -> Result<GeneratedCaptcha, String> {
        if self.should_fail {
            return Err("Captcha rendering failed".to_string());
        }
        let answer = self.answer.clone().unwrap_or_else(generate_image_code);
        Ok(GeneratedCaptcha {
            image: CaptchaImage {
                content_type: "text/plain".to_string(),
                bytes: answer.as_bytes().to_vec(),
            },
            answer,
        })
    }
}
