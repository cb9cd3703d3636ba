//! Domain error to HTTP response mapping
//!
//! Every failure leaves the API through [`handle_domain_error_with_lang`], so
//! the status code, `RetCode` and message for each error class live here.

use actix_web::{http::StatusCode, HttpRequest, HttpResponse};

use mall_core::errors::{DomainError, VerificationError};
use mall_shared::{JsonResponse, RetCode};

use crate::i18n::Language;

const STORE_ERROR_MESSAGE: &str = "Storage service unavailable | 数据库错误";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error | 服务器内部错误";

/// HTTP status and business code for a domain error
pub fn classify(error: &DomainError) -> (StatusCode, RetCode) {
    match error {
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, RetCode::ParamErr),
        DomainError::MissingParameter { .. } => {
            (StatusCode::BAD_REQUEST, RetCode::NecessaryParamErr)
        }
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, RetCode::ParamErr),
        DomainError::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, RetCode::ThrottlingErr),
        DomainError::Verification(VerificationError::ImageCodeExpired)
        | DomainError::Verification(VerificationError::ImageCodeMismatch) => {
            (StatusCode::BAD_REQUEST, RetCode::ImageCodeErr)
        }
        DomainError::Verification(VerificationError::SmsCodeExpired)
        | DomainError::Verification(VerificationError::SmsCodeMismatch) => {
            (StatusCode::BAD_REQUEST, RetCode::SmsCodeErr)
        }
        DomainError::Database { .. } | DomainError::Cache { .. } | DomainError::Internal { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, RetCode::DbErr)
        }
    }
}

/// Message shown to the client; store and internal details stay in the logs
fn client_message(error: &DomainError, lang: Language) -> String {
    match error {
        DomainError::Database { .. } | DomainError::Cache { .. } => {
            lang.localize(STORE_ERROR_MESSAGE).to_string()
        }
        DomainError::Internal { .. } => lang.localize(INTERNAL_ERROR_MESSAGE).to_string(),
        other => lang.localize(&other.to_string()).to_string(),
    }
}

pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    handle_domain_error_with_lang(error, Language::English)
}

pub fn handle_domain_error_with_lang(error: &DomainError, lang: Language) -> HttpResponse {
    let (status, code) = classify(error);

    if status.is_server_error() {
        tracing::error!(code = %code, error = %error, "Request failed");
    } else {
        tracing::warn!(code = %code, error = %error, "Request rejected");
    }

    let body = JsonResponse::message(code, client_message(error, lang));
    HttpResponse::build(status).json(body)
}

/// Render an error in the language requested by `req`
pub fn to_response(error: &DomainError, req: &HttpRequest) -> HttpResponse {
    handle_domain_error_with_lang(error, Language::from_request(req))
}
