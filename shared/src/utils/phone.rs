//! Mobile number utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Mainland China mobile number pattern accepted by the SMS gateway
pub static MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^1[3-9]\d{9}$").expect("mobile pattern is a valid regex")
});

/// Check if a mobile number is acceptable for SMS delivery.
///
/// The number must match exactly; no formatting characters are stripped.
pub fn is_valid_mobile(phone: &str) -> bool {
    MOBILE_REGEX.is_match(phone)
}

/// Remove common formatting characters from user-entered numbers
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Mask a phone number for logs (e.g., 138****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
