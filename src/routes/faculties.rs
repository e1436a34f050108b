use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::faculties::requests::{CreateFacultyRequest, FacultyListQuery, UpdateFacultyRequest};
use crate::models::users::entities::ViewerRole;
use crate::services::FacultyService;
use crate::utils::SafeIDI64;

// 懒加载的全局 FacultyService 实例
static FACULTY_SERVICE: Lazy<FacultyService> = Lazy::new(FacultyService::new_lazy);

// HTTP处理程序
pub async fn list_faculties(
    req: HttpRequest,
    query: web::Query<FacultyListQuery>,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.list_faculties(&req, query.into_inner()).await
}

pub async fn create_faculty(
    req: HttpRequest,
    data: web::Json<CreateFacultyRequest>,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.create_faculty(&req, data.into_inner()).await
}

pub async fn get_faculty(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.get_faculty(&req, path.0).await
}

pub async fn update_faculty(
    req: HttpRequest,
    path: SafeIDI64,
    update_data: web::Json<UpdateFacultyRequest>,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE
        .update_faculty(&req, path.0, update_data.into_inner())
        .await
}

pub async fn delete_faculty(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.delete_faculty(&req, path.0).await
}

// 配置路由
//
// 读操作对所有登录账号开放，写操作只允许超级用户与教师。
pub fn configure_faculties_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rest/faculty")
            .wrap(middlewares::RequireRole::writes_by(ViewerRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(list_faculties))
                    .route(web::post().to(create_faculty)),
            )
            .service(
                web::resource(["/{id}", "/{id}/"])
                    .route(web::get().to(get_faculty))
                    .route(web::put().to(update_faculty))
                    // PATCH 与 PUT 都按部分更新处理
                    .route(web::patch().to(update_faculty))
                    .route(web::delete().to(delete_faculty)),
            ),
    );
}
