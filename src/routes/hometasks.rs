use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::hometasks::requests::{CreateHometaskRequest, HometaskListQuery, UpdateHometaskRequest};
use crate::models::users::entities::ViewerRole;
use crate::services::HometaskService;
use crate::utils::SafeIDI64;

// 懒加载的全局 HometaskService 实例
static HOMETASK_SERVICE: Lazy<HometaskService> = Lazy::new(HometaskService::new_lazy);

// HTTP处理程序
pub async fn list_hometasks(
    req: HttpRequest,
    query: web::Query<HometaskListQuery>,
) -> ActixResult<HttpResponse> {
    HOMETASK_SERVICE.list_hometasks(&req, query.into_inner()).await
}

pub async fn create_hometask(
    req: HttpRequest,
    data: web::Json<CreateHometaskRequest>,
) -> ActixResult<HttpResponse> {
    HOMETASK_SERVICE.create_hometask(&req, data.into_inner()).await
}

pub async fn get_hometask(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    HOMETASK_SERVICE.get_hometask(&req, path.0).await
}

pub async fn update_hometask(
    req: HttpRequest,
    path: SafeIDI64,
    update_data: web::Json<UpdateHometaskRequest>,
) -> ActixResult<HttpResponse> {
    HOMETASK_SERVICE
        .update_hometask(&req, path.0, update_data.into_inner())
        .await
}

pub async fn delete_hometask(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    HOMETASK_SERVICE.delete_hometask(&req, path.0).await
}

// 配置路由
pub fn configure_hometasks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rest/hometask")
            .wrap(middlewares::RequireRole::writes_by(ViewerRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(list_hometasks))
                    .route(web::post().to(create_hometask)),
            )
            .service(
                web::resource(["/{id}", "/{id}/"])
                    .route(web::get().to(get_hometask))
                    .route(web::put().to(update_hometask))
                    // PATCH 与 PUT 都按部分更新处理
                    .route(web::patch().to(update_hometask))
                    .route(web::delete().to(delete_hometask)),
            ),
    );
}
