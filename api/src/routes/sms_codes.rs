use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use mall_core::errors::DomainError;
use mall_core::repositories::AreaRepository;
use mall_core::services::{CacheServiceTrait, CaptchaRendererTrait, SmsServiceTrait};
use mall_shared::phone::mask_phone_number;
use mall_shared::JsonResponse;

use super::AppState;
use crate::dto::{SendCodeData, SmsCodeQuery};
use crate::handlers::to_response;

/// Handler for `GET /sms_codes/{mobile}/?image_code=..&uuid=..`
///
/// Answers `{code, errmsg, resend_after}` once a code has been stored. Whether
/// the gateway delivered it is only logged.
pub async fn send_sms_code<R, C, S, G>(
    req: HttpRequest,
    state: web::Data<AppState<R, C, S, G>>,
    path: web::Path<String>,
    query: web::Query<SmsCodeQuery>,
) -> HttpResponse
where
    R: AreaRepository + 'static,
    C: CacheServiceTrait + 'static,
    S: SmsServiceTrait + 'static,
    G: CaptchaRendererTrait + 'static,
{
    let mobile = path.into_inner();

    if let Err(errors) = query.validate() {
        let error = DomainError::Validation {
            message: errors.to_string(),
        };
        return to_response(&error, &req);
    }

    let image_code = query.image_code.as_deref().unwrap_or("");
    let challenge_id = query.uuid.as_deref().unwrap_or("");

    match state
        .verification_service
        .send_sms_code(&mobile, image_code, challenge_id)
        .await
    {
        Ok(result) => {
            tracing::info!(
                event = "sms_code_requested",
                phone = %mask_phone_number(&mobile),
                dispatch = ?result.dispatch,
                "SMS code issued"
            );
            HttpResponse::Ok().json(JsonResponse::ok(SendCodeData {
                resend_after: result.resend_after_seconds,
            }))
        }
        Err(error) => to_response(&error, &req),
    }
}
