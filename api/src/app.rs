//! Application factory
//!
//! Builds the actix-web `App` around an already wired [`AppState`], so the
//! binary and the HTTP tests share one route table.

use actix_web::{error, web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use mall_core::repositories::AreaRepository;
use mall_core::services::{CacheServiceTrait, CaptchaRendererTrait, SmsServiceTrait};
use mall_shared::{JsonResponse, RetCode};

use crate::i18n::Language;
use crate::routes::{
    areas::list_areas, health::health_check, image_codes::image_code, sms_codes::send_sms_code,
    AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<R, C, S, G>(
    app_state: web::Data<AppState<R, C, S, G>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: AreaRepository + 'static,
    C: CacheServiceTrait + 'static,
    S: SmsServiceTrait + 'static,
    G: CaptchaRendererTrait + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::QueryConfig::default().error_handler(|err, req| {
            let lang = Language::from_request(req);
            let message = match lang {
                Language::English => format!("Invalid query string: {}", err),
                Language::Chinese => "参数错误".to_string(),
            };
            let response = HttpResponse::BadRequest()
                .json(JsonResponse::message(RetCode::ParamErr, message));
            error::InternalError::from_response(err, response).into()
        }))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .route("/areas/", web::get().to(list_areas::<R, C, S, G>))
        .route("/image_codes/{uuid}/", web::get().to(image_code::<R, C, S, G>))
        .route("/sms_codes/{mobile}/", web::get().to(send_sms_code::<R, C, S, G>))
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(JsonResponse::message(
        RetCode::ParamErr,
        "The requested resource was not found",
    ))
}
