//! Cloopen (CCP) template SMS client
//!
//! Every request is authenticated with two values derived from the account
//! SID, token and a `YYYYMMDDHHMMSS` timestamp:
//!
//! - `sig` query parameter: upper-case hex MD5 of `sid + token + timestamp`
//! - `Authorization` header: base64 of `sid:timestamp`
//!
//! The gateway answers with a JSON body whose `statusCode` is `"000000"` on
//! success; any other status is a rejection even when the HTTP status is 200.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use mall_shared::phone::mask_phone_number;

use super::sms_service::SmsService;
use crate::config::SmsConfig;
use crate::InfrastructureError;

/// Status code returned by the gateway for an accepted message
pub const CCP_SUCCESS_STATUS: &str = "000000";

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Request body of the TemplateSMS endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSmsRequest<'a> {
    pub to: &'a str,
    pub app_id: &'a str,
    pub template_id: &'a str,
    pub datas: &'a [String],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSmsResponse {
    pub status_code: String,
    #[serde(default)]
    pub status_msg: Option<String>,
    #[serde(default, rename = "templateSMS")]
    pub template_sms: Option<TemplateSmsReceipt>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSmsReceipt {
    #[serde(default)]
    pub sms_message_sid: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
}

impl TemplateSmsResponse {
    pub fn is_success(&self) -> bool {
        self.status_code == CCP_SUCCESS_STATUS
    }

    /// Convert the gateway answer into a message id or a rejection
    pub fn into_result(self) -> Result<String, InfrastructureError> {
        if !self.is_success() {
            return Err(InfrastructureError::Sms(format!(
                "CCP rejected message: status {} ({})",
                self.status_code,
                self.status_msg.as_deref().unwrap_or("no message")
            )));
        }

        Ok(self
            .template_sms
            .and_then(|receipt| receipt.sms_message_sid)
            .unwrap_or_default())
    }
}

/// Format a timestamp the way the gateway expects it
pub fn request_timestamp(now: DateTime<Utc>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Upper-case hex MD5 of `sid + token + timestamp`
pub fn request_signature(account_sid: &str, auth_token: &str, timestamp: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(account_sid.as_bytes());
    hasher.update(auth_token.as_bytes());
    hasher.update(timestamp.as_bytes());

    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{:02X}", byte))
        .collect()
}

/// Base64 of `sid:timestamp`
pub fn authorization_header(account_sid: &str, timestamp: &str) -> String {
    STANDARD.encode(format!("{}:{}", account_sid, timestamp))
}

/// Cloopen REST client sending registered templates
pub struct CcpSmsService {
    client: reqwest::Client,
    config: SmsConfig,
}

impl CcpSmsService {
    pub fn new(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        if !config.has_credentials() {
            return Err(InfrastructureError::Config(
                "CCP_ACCOUNT_SID, CCP_AUTH_TOKEN and CCP_APP_ID must be set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        info!(
            server = %config.server_ip,
            port = config.server_port,
            "CCP SMS service initialized"
        );

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// TemplateSMS endpoint for the given signature
    pub fn endpoint(&self, sig: &str) -> String {
        format!(
            "https://{}:{}/{}/Accounts/{}/SMS/TemplateSMS?sig={}",
            self.config.server_ip,
            self.config.server_port,
            self.config.soft_version,
            self.config.account_sid,
            sig
        )
    }
}

#[async_trait]
impl SmsService for CcpSmsService {
    async fn send_template_sms(
        &self,
        to: &str,
        datas: &[String],
        template_id: &str,
    ) -> Result<String, InfrastructureError> {
        let timestamp = request_timestamp(Utc::now());
        let sig = request_signature(&self.config.account_sid, &self.config.auth_token, &timestamp);
        let body = TemplateSmsRequest {
            to,
            app_id: &self.config.app_id,
            template_id,
            datas,
        };

        debug!(phone = %mask_phone_number(to), template_id, "Sending CCP template SMS");

        let response = self
            .client
            .post(self.endpoint(&sig))
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CONTENT_TYPE, "application/json;charset=utf-8")
            .header(
                reqwest::header::AUTHORIZATION,
                authorization_header(&self.config.account_sid, &timestamp),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(phone = %mask_phone_number(to), error = %e, "CCP request failed");
                InfrastructureError::Http(e)
            })?;

        let answer: TemplateSmsResponse = response.json().await?;
        let status = answer.status_code.clone();

        match answer.into_result() {
            Ok(message_id) => {
                info!(
                    target: "sms_service",
                    provider = "ccp",
                    phone = %mask_phone_number(to),
                    message_id = %message_id,
                    "SMS sent"
                );
                Ok(message_id)
            }
            Err(e) => {
                error!(phone = %mask_phone_number(to), status = %status, "CCP rejected SMS");
                Err(e)
            }
        }
    }

    fn provider_name(&self) -> &str {
        "CCP"
    }

    async fn is_available(&self) -> bool {
        self.config.has_credentials()
    }
}
