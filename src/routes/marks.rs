use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::marks::requests::{CreateMarkRequest, MarkListQuery, UpdateMarkRequest};
use crate::models::users::entities::ViewerRole;
use crate::services::MarkService;
use crate::utils::SafeIDI64;

// 懒加载的全局 MarkService 实例
static MARK_SERVICE: Lazy<MarkService> = Lazy::new(MarkService::new_lazy);

// HTTP处理程序
pub async fn list_marks(
    req: HttpRequest,
    query: web::Query<MarkListQuery>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.list_marks(&req, query.into_inner()).await
}

pub async fn create_mark(
    req: HttpRequest,
    data: web::Json<CreateMarkRequest>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.create_mark(&req, data.into_inner()).await
}

pub async fn get_mark(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    MARK_SERVICE.get_mark(&req, path.0).await
}

pub async fn update_mark(
    req: HttpRequest,
    path: SafeIDI64,
    update_data: web::Json<UpdateMarkRequest>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE
        .update_mark(&req, path.0, update_data.into_inner())
        .await
}

pub async fn delete_mark(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    MARK_SERVICE.delete_mark(&req, path.0).await
}

// 配置路由
pub fn configure_marks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rest/mark")
            .wrap(middlewares::RequireRole::writes_by(ViewerRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(list_marks))
                    .route(web::post().to(create_mark)),
            )
            .service(
                web::resource(["/{id}", "/{id}/"])
                    .route(web::get().to(get_mark))
                    .route(web::put().to(update_mark))
                    // PATCH 与 PUT 都按部分更新处理
                    .route(web::patch().to(update_mark))
                    .route(web::delete().to(delete_mark)),
            ),
    );
}
