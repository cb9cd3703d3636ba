use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of `GET /sms_codes/{mobile}/`
///
/// Both fields are optional at this layer; the service reports a missing one
/// as NECESSARYPARAMERR.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SmsCodeQuery {
    #[validate(length(max = 16))]
    pub image_code: Option<String>,

    /// Challenge id the image code was issued under
    #[validate(length(max = 64))]
    pub uuid: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeData {
    /// Seconds until another code may be requested
    pub resend_after: u64,
}
