use actix_web::{http::header, web, HttpRequest, HttpResponse};

use mall_core::repositories::AreaRepository;
use mall_core::services::{CacheServiceTrait, CaptchaRendererTrait, SmsServiceTrait};

use super::AppState;
use crate::handlers::to_response;

/// Handler for `GET /image_codes/{uuid}/`
///
/// Stores a fresh answer under the client-chosen id and returns the rendered
/// image. Requesting the same id again replaces the previous answer.
pub async fn image_code<R, C, S, G>(
    req: HttpRequest,
    state: web::Data<AppState<R, C, S, G>>,
    path: web::Path<String>,
) -> HttpResponse
where
    R: AreaRepository + 'static,
    C: CacheServiceTrait + 'static,
    S: SmsServiceTrait + 'static,
    G: CaptchaRendererTrait + 'static,
{
    match state.verification_service.issue_image_challenge(&path).await {
        Ok(challenge) => HttpResponse::Ok()
            .content_type(challenge.image.content_type)
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .body(challenge.image.bytes),
        Err(error) => to_response(&error, &req),
    }
}
