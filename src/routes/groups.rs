use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::groups::requests::{CreateGroupRequest, GroupListQuery, UpdateGroupRequest};
use crate::models::users::entities::ViewerRole;
use crate::services::GroupService;
use crate::utils::SafeIDI64;

// 懒加载的全局 GroupService 实例
static GROUP_SERVICE: Lazy<GroupService> = Lazy::new(GroupService::new_lazy);

// HTTP处理程序
pub async fn list_groups(
    req: HttpRequest,
    query: web::Query<GroupListQuery>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.list_groups(&req, query.into_inner()).await
}

pub async fn create_group(
    req: HttpRequest,
    data: web::Json<CreateGroupRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.create_group(&req, data.into_inner()).await
}

pub async fn get_group(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.get_group(&req, path.0).await
}

pub async fn update_group(
    req: HttpRequest,
    path: SafeIDI64,
    update_data: web::Json<UpdateGroupRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE
        .update_group(&req, path.0, update_data.into_inner())
        .await
}

pub async fn delete_group(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.delete_group(&req, path.0).await
}

// 配置路由
pub fn configure_groups_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rest/group")
            .wrap(middlewares::RequireRole::writes_by(ViewerRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(list_groups))
                    .route(web::post().to(create_group)),
            )
            .service(
                web::resource(["/{id}", "/{id}/"])
                    .route(web::get().to(get_group))
                    .route(web::put().to(update_group))
                    .route(web::patch().to(update_group))
                    .route(web::delete().to(delete_group)),
            ),
    );
}
