//! Response codes and the JSON response envelope
//!
//! Every endpoint answers with `{"code": "...", "errmsg": "...", ...payload}`.
//! The payload fields are flattened into the top-level object so clients read
//! `province_list` or `sub_data` next to `code`.

use serde::{Deserialize, Serialize};

/// Fixed enumeration of business response codes, serialized as strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RetCode {
    #[serde(rename = "0")]
    Ok,
    #[serde(rename = "4001")]
    ImageCodeErr,
    #[serde(rename = "4002")]
    ThrottlingErr,
    #[serde(rename = "4003")]
    NecessaryParamErr,
    #[serde(rename = "4008")]
    SmsCodeErr,
    #[serde(rename = "4101")]
    SessionErr,
    #[serde(rename = "5000")]
    DbErr,
    #[serde(rename = "5006")]
    ParamErr,
}

impl RetCode {
    /// Wire representation of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            RetCode::Ok => "0",
            RetCode::ImageCodeErr => "4001",
            RetCode::ThrottlingErr => "4002",
            RetCode::NecessaryParamErr => "4003",
            RetCode::SmsCodeErr => "4008",
            RetCode::SessionErr => "4101",
            RetCode::DbErr => "5000",
            RetCode::ParamErr => "5006",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, RetCode::Ok)
    }
}

impl std::fmt::Display for RetCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload type for responses that carry nothing beyond code and message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoData {}

/// Standard JSON response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse<T> {
    /// Business response code
    pub code: RetCode,

    /// Human-readable message, "OK" on success
    pub errmsg: String,

    /// Endpoint-specific payload, flattened into the envelope
    #[serde(flatten)]
    pub data: T,
}

impl<T> JsonResponse<T> {
    /// Create a successful response around a payload
    pub fn ok(data: T) -> Self {
        Self {
            code: RetCode::Ok,
            errmsg: "OK".to_string(),
            data,
        }
    }
}

impl JsonResponse<NoData> {
    /// Create a response with only a code and message
    pub fn message(code: RetCode, errmsg: impl Into<String>) -> Self {
        Self {
            code,
            errmsg: errmsg.into(),
            data: NoData::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Provinces {
        province_list: Vec<u32>,
    }

    #[test]
    fn test_ret_code_wire_format() {
        assert_eq!(serde_json::to_value(RetCode::Ok).unwrap(), json!("0"));
        assert_eq!(serde_json::to_value(RetCode::ImageCodeErr).unwrap(), json!("4001"));
        assert_eq!(serde_json::to_value(RetCode::ThrottlingErr).unwrap(), json!("4002"));
        assert_eq!(serde_json::to_value(RetCode::DbErr).unwrap(), json!("5000"));

        let parsed: RetCode = serde_json::from_value(json!("4101")).unwrap();
        assert_eq!(parsed, RetCode::SessionErr);
        assert_eq!(RetCode::ParamErr.to_string(), "5006");
    }

    #[test]
    fn test_payload_is_flattened() {
        let response = JsonResponse::ok(Provinces {
            province_list: vec![1, 2],
        });
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["code"], "0");
        assert_eq!(value["errmsg"], "OK");
        assert_eq!(value["province_list"], json!([1, 2]));
    }

    #[test]
    fn test_message_response() {
        let response = JsonResponse::message(RetCode::ThrottlingErr, "too frequent");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value, json!({"code": "4002", "errmsg": "too frequent"}));
        assert!(!response.code.is_ok());
    }
}
