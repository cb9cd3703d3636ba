use actix_web::{web, HttpRequest, HttpResponse};

use mall_core::repositories::AreaRepository;
use mall_core::services::{CacheServiceTrait, CaptchaRendererTrait, SmsServiceTrait};
use mall_shared::JsonResponse;

use super::AppState;
use crate::dto::{AreaQuery, ProvinceListData, SubAreaResponseData};
use crate::handlers::to_response;

/// Handler for `GET /areas/`
///
/// Without `area_id` answers `{code, errmsg, province_list: [{id, name}]}`;
/// with it answers `{code, errmsg, sub_data: {id, name, subs}}`.
pub async fn list_areas<R, C, S, G>(
    req: HttpRequest,
    state: web::Data<AppState<R, C, S, G>>,
    query: web::Query<AreaQuery>,
) -> HttpResponse
where
    R: AreaRepository + 'static,
    C: CacheServiceTrait + 'static,
    S: SmsServiceTrait + 'static,
    G: CaptchaRendererTrait + 'static,
{
    let area_id = match query.parse_area_id() {
        Ok(area_id) => area_id,
        Err(error) => return to_response(&error, &req),
    };

    match area_id {
        None => match state.area_service.get_provinces().await {
            Ok(province_list) => {
                HttpResponse::Ok().json(JsonResponse::ok(ProvinceListData { province_list }))
            }
            Err(error) => to_response(&error, &req),
        },
        Some(area_id) => match state.area_service.get_sub_areas(area_id).await {
            Ok(sub_data) => {
                HttpResponse::Ok().json(JsonResponse::ok(SubAreaResponseData { sub_data }))
            }
            Err(error) => to_response(&error, &req),
        },
    }
}
