//! Verification codes: image challenge answers and SMS codes.
//!
//! Both live only in the verification cache. This module owns the key schema
//! and the generators; storage and delivery belong to the services.

use rand::{rngs::OsRng, Rng};

/// Length of an SMS verification code
pub const CODE_LENGTH: usize = 6;

/// Length of an image challenge answer
pub const IMAGE_CODE_LENGTH: usize = 4;

/// Characters used for image challenge answers (no 0/O, 1/I)
pub const IMAGE_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Value stored under the resend throttle key
pub const SEND_FLAG_MARKER: &str = "1";

/// Cache key holding the answer for an image challenge
pub fn image_code_key(challenge_id: &str) -> String {
    format!("img_{}", challenge_id)
}

/// Cache key holding the SMS code issued to a mobile number
pub fn sms_code_key(mobile: &str) -> String {
    format!("sms_{}", mobile)
}

/// Cache key marking that a mobile number is inside its resend interval
pub fn send_flag_key(mobile: &str) -> String {
    format!("send_flag_{}", mobile)
}

/// Generate a 6-digit SMS code, zero-padded, from the OS CSPRNG
pub fn generate_sms_code() -> String {
    let code: u32 = OsRng.gen_range(0..=999_999);
    format!("{:06}", code)
}

/// Generate an image challenge answer
pub fn generate_image_code() -> String {
    (0..IMAGE_CODE_LENGTH)
        .map(|_| {
            let idx = OsRng.gen_range(0..IMAGE_CODE_ALPHABET.len());
            IMAGE_CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Compare a submitted answer with the stored one, ignoring ASCII case
pub fn image_code_matches(stored: &str, submitted: &str) -> bool {
    stored.trim().eq_ignore_ascii_case(submitted.trim())
}

/// Check that a string looks like an SMS code
pub fn is_valid_code_format(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit())
}
